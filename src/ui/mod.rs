//! Presentation capabilities handed to the views
//!
//! A view's only externally visible effects are alerts and navigations; both
//! go through these traits.

pub mod console;
pub mod messages;

pub use console::{ConsoleAlerter, ConsoleNavigator};

use crate::router::Route;

/// Modal alert sink
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}

/// Route change sink
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
