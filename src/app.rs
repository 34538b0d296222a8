//! Application context and view construction
//!
//! The context bundles every capability a view may need. It is cheap to
//! clone, and each navigation builds a fresh view from it, so nothing but the
//! persisted session outlives a route change.

use crate::api::{DeliveryApi, HttpDeliveryApi};
use crate::config::ClientConfig;
use crate::router::Route;
use crate::session::{FileSessionStore, SessionStore};
use crate::ui::{messages, Alerter, Navigator};
use crate::views::{LoginView, MyOrdersView, OrderDetailsView, PlaceOrderView, RegisterView};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn DeliveryApi>,
    pub session: Arc<dyn SessionStore>,
    pub alerter: Arc<dyn Alerter>,
    pub navigator: Arc<dyn Navigator>,
    /// Path segment used for `GET /users/{user}/orders`
    pub orders_user: String,
}

impl AppContext {
    pub fn new(
        api: Arc<dyn DeliveryApi>,
        session: Arc<dyn SessionStore>,
        alerter: Arc<dyn Alerter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            alerter,
            navigator,
            orders_user: crate::config::DEFAULT_ORDERS_USER.to_string(),
        }
    }

    /// Wire the HTTP client and file session store described by `config`
    pub fn from_config(
        config: &ClientConfig,
        alerter: Arc<dyn Alerter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = FileSessionStore::new(config.session_file.clone());
        log::debug!("Session kept in {}", session.path().display());
        Self {
            api: Arc::new(HttpDeliveryApi::from_config(config)),
            session: Arc::new(session),
            alerter,
            navigator,
            orders_user: config.orders_user.clone(),
        }
    }

    pub fn with_orders_user(mut self, user: impl Into<String>) -> Self {
        self.orders_user = user.into();
        self
    }

    /// Build the view for a route without running any initial load
    pub fn view_for(&self, route: &Route) -> View {
        match route {
            Route::Login => View::Login(LoginView::new(self.clone())),
            Route::Register => View::Register(RegisterView::new(self.clone())),
            Route::PlaceOrder => View::PlaceOrder(PlaceOrderView::new(self.clone())),
            Route::MyOrders => View::MyOrders(MyOrdersView::new(self.clone())),
            Route::OrderDetails(id) => {
                View::OrderDetails(OrderDetailsView::new(self.clone(), Some(id.clone())))
            },
        }
    }

    /// Build the view for a route and run its on-display load
    pub async fn open(&self, route: &Route) -> View {
        log::debug!("Opening {}", route);
        let mut view = self.view_for(route);
        match &mut view {
            View::MyOrders(orders) => {
                orders.load().await;
            },
            View::OrderDetails(details) => {
                details.load().await;
            },
            View::Login(_) | View::Register(_) | View::PlaceOrder(_) => {},
        }
        view
    }

    /// End the session and return to the login view
    pub fn logout(&self) {
        match self.session.clear() {
            Ok(()) => {
                log::info!("Session cleared");
                self.alerter.alert(messages::LOGGED_OUT);
            },
            Err(e) => log::error!("Failed to clear session: {}", e),
        }
        self.navigator.navigate(Route::Login);
    }
}

/// A live view for the current route
pub enum View {
    Login(LoginView),
    Register(RegisterView),
    PlaceOrder(PlaceOrderView),
    MyOrders(MyOrdersView),
    OrderDetails(OrderDetailsView),
}

impl View {
    pub fn route(&self) -> Route {
        match self {
            View::Login(_) => Route::Login,
            View::Register(_) => Route::Register,
            View::PlaceOrder(_) => Route::PlaceOrder,
            View::MyOrders(_) => Route::MyOrders,
            View::OrderDetails(details) => match details.order_id() {
                Some(id) => Route::OrderDetails(id.clone()),
                None => Route::MyOrders,
            },
        }
    }
}
