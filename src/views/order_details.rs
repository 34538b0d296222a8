//! Order detail view
//!
//! Shows one order and lets the user cancel it while it is still `pending`.
//! After a successful cancellation the local status is set to `cancelled`;
//! the order is not fetched again.

use crate::app::AppContext;
use crate::types::{OrderDetails, OrderId, OrderStatus};
use crate::ui::messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelResult {
    /// Status is not `pending` (or nothing is loaded); no request issued
    NotCancellable,
    Cancelled,
    Failed,
}

pub struct OrderDetailsView {
    ctx: AppContext,
    order_id: Option<OrderId>,
    details: Option<OrderDetails>,
}

impl OrderDetailsView {
    pub fn new(ctx: AppContext, order_id: Option<OrderId>) -> Self {
        Self {
            ctx,
            order_id,
            details: None,
        }
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    pub fn details(&self) -> Option<&OrderDetails> {
        self.details.as_ref()
    }

    pub fn status(&self) -> Option<&OrderStatus> {
        self.details.as_ref().map(|d| &d.status)
    }

    /// Fetch the order named by the route, if any. Returns whether details
    /// are now held.
    pub async fn load(&mut self) -> bool {
        let Some(id) = &self.order_id else {
            return false;
        };

        match self.ctx.api.get_order(id).await {
            Ok(details) => {
                self.details = Some(details);
                true
            },
            Err(e) => {
                log::error!("Error fetching order details for {}: {}", id, e);
                false
            },
        }
    }

    pub async fn cancel(&mut self) -> CancelResult {
        let (Some(id), Some(details)) = (&self.order_id, &mut self.details) else {
            return CancelResult::NotCancellable;
        };
        if !details.status.is_cancellable() {
            log::debug!("Order {} is {}, not cancelling", id, details.status);
            return CancelResult::NotCancellable;
        }

        match self.ctx.api.cancel_order(id).await {
            Ok(()) => {
                log::info!("Order {} cancelled", id);
                details.status = OrderStatus::Cancelled;
                self.ctx.alerter.alert(messages::ORDER_CANCELLED);
                CancelResult::Cancelled
            },
            Err(e) => {
                log::error!("Error cancelling order {}: {}", id, e);
                self.ctx.alerter.alert(messages::ORDER_CANCEL_FAILED);
                CancelResult::Failed
            },
        }
    }
}
