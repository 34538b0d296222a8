//! Client-side routes
//!
//! Maps paths to the five views. `/` redirects to `/login`.

use crate::types::OrderId;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("No route matches {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    PlaceOrder,
    MyOrders,
    OrderDetails(OrderId),
}

impl Route {
    /// Resolve a path, ignoring any query string, fragment or trailing slash
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        match segments.as_slice() {
            [""] | ["login"] => Ok(Route::Login),
            ["register"] => Ok(Route::Register),
            ["place-order"] => Ok(Route::PlaceOrder),
            ["my-orders"] => Ok(Route::MyOrders),
            ["order-details", id] => OrderId::from_path_segment(id)
                .map(Route::OrderDetails)
                .ok_or_else(|| RouteError::Unknown(path.to_string())),
            _ => Err(RouteError::Unknown(path.to_string())),
        }
    }

    /// Canonical path of the route
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::PlaceOrder => "/place-order".to_string(),
            Route::MyOrders => "/my-orders".to_string(),
            Route::OrderDetails(id) => format!("/order-details/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
