//! Registration view

use crate::api::ClientError;
use crate::app::AppContext;
use crate::types::{RegistrationOutcome, RegistrationRequest};
use crate::ui::messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterResult {
    Registered,
    /// The backend answered but did not confirm the account
    Refused,
    Unreachable,
    /// Error status, structured or not
    Failed,
}

pub struct RegisterView {
    ctx: AppContext,
    pub form: RegistrationRequest,
}

impl RegisterView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: RegistrationRequest::default(),
        }
    }

    pub async fn submit(&mut self) -> RegisterResult {
        log::debug!("Registration submitted: {:?}", self.form);

        match self.ctx.api.register(&self.form).await {
            Ok(RegistrationOutcome::Registered {
                ..
            }) => {
                log::info!("Registered {}", self.form.email);
                self.ctx.alerter.alert(messages::REGISTER_SUCCESS);
                RegisterResult::Registered
            },
            Ok(RegistrationOutcome::Refused {
                message,
            }) => {
                log::warn!("Registration refused: {:?}", message);
                self.ctx.alerter.alert(&messages::register_refused(message.as_deref()));
                RegisterResult::Refused
            },
            Err(error) => {
                log::error!("Registration error: {}", error);
                let (alert, result) = match &error {
                    ClientError::Network(_) => {
                        (messages::NETWORK_UNREACHABLE.to_string(), RegisterResult::Unreachable)
                    },
                    ClientError::Api {
                        message,
                        ..
                    } => (messages::register_error(message), RegisterResult::Failed),
                    ClientError::Http {
                        status,
                        reason,
                    } => (messages::register_http_error(*status, reason), RegisterResult::Failed),
                    ClientError::Unauthorized => {
                        (messages::register_http_error(401, "Unauthorized"), RegisterResult::Failed)
                    },
                    ClientError::Decode(_) => {
                        (messages::register_unexpected(&error.to_string()), RegisterResult::Failed)
                    },
                };
                self.ctx.alerter.alert(&alert);
                result
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::mock_api::{ApiCall, MockDeliveryApi, RecordingUi};
    use crate::session::MemorySessionStore;
    use std::sync::Arc;

    fn view(api: &Arc<MockDeliveryApi>) -> (RegisterView, Arc<RecordingUi>) {
        let ui = Arc::new(RecordingUi::new());
        let ctx =
            AppContext::new(api.clone(), Arc::new(MemorySessionStore::new()), ui.clone(), ui.clone());
        let mut view = RegisterView::new(ctx);
        view.form = RegistrationRequest {
            email: "new@pts.local".to_string(),
            password: "secret".to_string(),
            phone: "01000000000".to_string(),
            name: "Nour".to_string(),
            location: None,
        };
        (view, ui)
    }

    #[tokio::test]
    async fn test_truthy_result_is_success() {
        let api = Arc::new(MockDeliveryApi::new());
        api.push_register(Ok(RegistrationOutcome::Registered {
            message: None,
        }));
        let (mut view, ui) = view(&api);

        assert_eq!(view.submit().await, RegisterResult::Registered);
        assert_eq!(ui.alerts(), vec![messages::REGISTER_SUCCESS.to_string()]);
        assert!(matches!(api.calls().as_slice(), [ApiCall::Register(_)]));
    }

    #[tokio::test]
    async fn test_refusal_shows_server_message_or_fallback() {
        let api = Arc::new(MockDeliveryApi::new());
        api.push_register(Ok(RegistrationOutcome::Refused {
            message: Some("Email taken".to_string()),
        }));
        api.push_register(Ok(RegistrationOutcome::Refused {
            message: None,
        }));
        let (mut view, ui) = view(&api);

        assert_eq!(view.submit().await, RegisterResult::Refused);
        assert_eq!(view.submit().await, RegisterResult::Refused);
        assert_eq!(
            ui.alerts(),
            vec![
                "Registration failed: Email taken".to_string(),
                "Registration failed: Invalid response from the server.".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_three_distinct_error_messages() {
        let api = Arc::new(MockDeliveryApi::new());
        api.push_register(Err(ClientError::Network("refused".to_string())));
        api.push_register(Err(ClientError::Api {
            status: 409,
            message: "Email already registered".to_string(),
        }));
        api.push_register(Err(ClientError::Http {
            status: 500,
            reason: "Internal Server Error".to_string(),
        }));
        let (mut view, ui) = view(&api);

        assert_eq!(view.submit().await, RegisterResult::Unreachable);
        assert_eq!(view.submit().await, RegisterResult::Failed);
        assert_eq!(view.submit().await, RegisterResult::Failed);
        assert_eq!(
            ui.alerts(),
            vec![
                messages::NETWORK_UNREACHABLE.to_string(),
                "Error: Email already registered".to_string(),
                "An error occurred during registration. Status: 500 - Internal Server Error"
                    .to_string(),
            ]
        );
    }
}
