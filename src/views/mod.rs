//! View models
//!
//! Each view binds one form (or one display) to one backend call and turns
//! the reply into an alert and, sometimes, a navigation. Views keep only
//! their own local state.

pub mod login;
pub mod my_orders;
pub mod order_details;
pub mod place_order;
pub mod register;

pub use login::{LoginResult, LoginView};
pub use my_orders::{MyOrdersView, OrdersLoad};
pub use order_details::{CancelResult, OrderDetailsView};
pub use place_order::{PlaceOrderResult, PlaceOrderView};
pub use register::{RegisterResult, RegisterView};

use crate::app::AppContext;
use crate::router::Route;
use crate::session::SessionToken;
use crate::ui::messages;

/// Stored token, or `None` when there is none or it can't be read
fn current_token(ctx: &AppContext) -> Option<SessionToken> {
    match ctx.session.token() {
        Ok(token) => token,
        Err(e) => {
            log::error!("Failed to read session: {}", e);
            None
        },
    }
}

/// Shared reaction to a 401: tell the user and send them to login
fn session_expired(ctx: &AppContext) {
    ctx.alerter.alert(messages::SESSION_EXPIRED);
    ctx.navigator.navigate(Route::Login);
}
