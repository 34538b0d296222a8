//! Order placement view

use super::{current_token, session_expired};
use crate::api::ClientError;
use crate::app::AppContext;
use crate::router::Route;
use crate::types::{OrderConfirmation, OrderRequest};
use crate::ui::messages;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderResult {
    /// Validation failed, nothing sent
    Invalid(Vec<&'static str>),
    /// No session; redirected to login
    LoginRequired,
    Placed(OrderConfirmation),
    /// 401; redirected to login
    SessionExpired,
    Failed,
}

pub struct PlaceOrderView {
    ctx: AppContext,
    pub form: OrderRequest,
}

impl PlaceOrderView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: OrderRequest::default(),
        }
    }

    pub async fn submit(&mut self) -> PlaceOrderResult {
        let invalid = self.form.invalid_fields();
        if !invalid.is_empty() {
            log::debug!("Order form is invalid: {:?}", invalid);
            self.ctx.alerter.alert(messages::ORDER_FORM_INVALID);
            return PlaceOrderResult::Invalid(invalid);
        }

        let Some(token) = current_token(&self.ctx) else {
            self.ctx.alerter.alert(messages::ORDER_LOGIN_REQUIRED);
            self.ctx.navigator.navigate(Route::Login);
            return PlaceOrderResult::LoginRequired;
        };

        log::debug!("Order data: {:?}", self.form);

        match self.ctx.api.place_order(&token, &self.form).await {
            Ok(confirmation) => {
                log::info!("Order placed: {:?}", confirmation.id);
                self.ctx.alerter.alert(messages::ORDER_PLACED);
                self.form.reset();
                PlaceOrderResult::Placed(confirmation)
            },
            Err(ClientError::Unauthorized) => {
                log::warn!("Order rejected: session expired");
                session_expired(&self.ctx);
                PlaceOrderResult::SessionExpired
            },
            Err(e) => {
                log::error!("Error placing order: {}", e);
                self.ctx.alerter.alert(messages::ORDER_FAILED);
                PlaceOrderResult::Failed
            },
        }
    }
}
