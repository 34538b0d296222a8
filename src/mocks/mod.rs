//! Test doubles: a scripted API for view tests and an in-memory HTTP backend
//! for end-to-end runs.

pub mod mock_api;
pub mod mock_backend;

pub use mock_api::{ApiCall, MockDeliveryApi, RecordingUi};
pub use mock_backend::MockBackend;
