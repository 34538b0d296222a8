//! Terminal implementations of the UI capabilities

use super::{Alerter, Navigator};
use crate::router::Route;
use std::sync::Mutex;

/// Prints alerts on stdout as a boxed line
#[derive(Debug, Default)]
pub struct ConsoleAlerter;

impl Alerter for ConsoleAlerter {
    fn alert(&self, message: &str) {
        println!("[!] {}", message);
    }
}

/// Holds the last requested route until the shell picks it up
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    pending: Mutex<Option<Route>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the route requested since the last call, if any
    pub fn take_pending(&self) -> Option<Route> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        log::debug!("Navigating to {}", route);
        *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_navigation_wins() {
        let navigator = ConsoleNavigator::new();
        assert!(navigator.take_pending().is_none());

        navigator.navigate(Route::MyOrders);
        navigator.navigate(Route::Login);

        assert_eq!(navigator.take_pending(), Some(Route::Login));
        assert!(navigator.take_pending().is_none());
    }
}
