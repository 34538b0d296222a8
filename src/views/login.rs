//! Login view

use crate::api::ClientError;
use crate::app::AppContext;
use crate::types::{Credentials, LoginOutcome, UserProfile};
use crate::ui::messages;

/// Result of a login submission
#[derive(Debug, Clone, PartialEq)]
pub enum LoginResult {
    /// Form incomplete, nothing sent
    Incomplete,
    /// Token stored
    LoggedIn(UserProfile),
    /// The reply lacked a token or user
    Rejected,
    /// The backend could not be reached
    Unreachable,
    Failed,
}

pub struct LoginView {
    ctx: AppContext,
    pub form: Credentials,
}

impl LoginView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: Credentials::default(),
        }
    }

    /// Exchange the form's credentials for a session token
    pub async fn submit(&mut self) -> LoginResult {
        if !self.form.is_complete() {
            self.ctx.alerter.alert(messages::LOGIN_INCOMPLETE);
            return LoginResult::Incomplete;
        }

        log::debug!("Login submitted for {}", self.form.email);

        match self.ctx.api.login(&self.form).await {
            Ok(LoginOutcome::Authenticated {
                token,
                user,
            }) => {
                if let Err(e) = self.ctx.session.save_token(&token) {
                    log::error!("Failed to persist session: {}", e);
                    self.ctx.alerter.alert(messages::LOGIN_NOT_STORED);
                    return LoginResult::Failed;
                }
                log::info!("Logged in as {}", user.email.as_deref().unwrap_or(&self.form.email));
                self.ctx.alerter.alert(messages::LOGIN_SUCCESS);
                LoginResult::LoggedIn(user)
            },
            Ok(LoginOutcome::Rejected) => {
                log::warn!("Login reply without token or user");
                self.ctx.alerter.alert(messages::LOGIN_INVALID_REPLY);
                LoginResult::Rejected
            },
            Err(ClientError::Network(e)) => {
                log::error!("Login error: {}", e);
                self.ctx.alerter.alert(messages::NETWORK_UNREACHABLE);
                LoginResult::Unreachable
            },
            Err(e) => {
                log::error!("Login error: {}", e);
                self.ctx.alerter.alert(messages::LOGIN_FAILED);
                LoginResult::Failed
            },
        }
    }
}
