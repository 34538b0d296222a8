//! Order list view

use super::{current_token, session_expired};
use crate::api::ClientError;
use crate::app::AppContext;
use crate::router::Route;
use crate::types::{OrderId, OrderSummary};
use crate::ui::messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrdersLoad {
    LoginRequired,
    /// Number of orders received
    Loaded(usize),
    SessionExpired,
    Failed,
}

pub struct MyOrdersView {
    ctx: AppContext,
    orders: Vec<OrderSummary>,
}

impl MyOrdersView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            orders: Vec::new(),
        }
    }

    pub fn orders(&self) -> &[OrderSummary] {
        &self.orders
    }

    /// Fetch the signed-in user's orders
    pub async fn load(&mut self) -> OrdersLoad {
        let Some(token) = current_token(&self.ctx) else {
            self.ctx.alerter.alert(messages::ORDERS_LOGIN_REQUIRED);
            self.ctx.navigator.navigate(Route::Login);
            return OrdersLoad::LoginRequired;
        };

        match self.ctx.api.list_orders(&token, &self.ctx.orders_user).await {
            Ok(orders) => {
                log::debug!("Fetched {} orders", orders.len());
                self.orders = orders;
                OrdersLoad::Loaded(self.orders.len())
            },
            Err(ClientError::Unauthorized) => {
                session_expired(&self.ctx);
                OrdersLoad::SessionExpired
            },
            Err(e) => {
                log::error!("Error fetching orders: {}", e);
                self.ctx.alerter.alert(messages::ORDERS_FETCH_FAILED);
                OrdersLoad::Failed
            },
        }
    }

    /// Open the detail view of the order at `index`. Entries without an
    /// identifier have no detail view.
    pub fn view_order_details(&self, index: usize) -> Option<&OrderId> {
        let id = self.orders.get(index)?.id.as_ref()?;
        self.ctx.navigator.navigate(Route::OrderDetails(id.clone()));
        Some(id)
    }
}
