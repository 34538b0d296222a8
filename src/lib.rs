//! PTS Client
//!
//! Client for the Package Tracking System delivery backend: login,
//! registration, order placement, order listing and order cancellation, each
//! exposed as a view model over a typed HTTP API. A terminal shell drives the
//! views; an in-memory mock backend serves them for development and tests.

pub mod api;
pub mod app;
pub mod config;
pub mod mocks;
pub mod router;
pub mod session;
pub mod shell;
pub mod types;
pub mod ui;
pub mod views;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_NAME: &str = "pts-client";
