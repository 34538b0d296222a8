//! User-facing alert texts

pub const NETWORK_UNREACHABLE: &str = "Network error: Unable to reach the server.";
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

pub const LOGIN_INCOMPLETE: &str = "Please enter your email and password.";
pub const LOGIN_SUCCESS: &str = "You logged in successfully :)";
pub const LOGIN_INVALID_REPLY: &str = "Login failed: Invalid response from the server.";
pub const LOGIN_FAILED: &str = "An error occurred during login. Please try again.";
pub const LOGIN_NOT_STORED: &str = "Login failed: the session could not be saved.";
pub const LOGGED_OUT: &str = "You have been logged out.";

pub const REGISTER_SUCCESS: &str = "You registered successfully :)";
pub const REGISTER_REFUSED_FALLBACK: &str = "Invalid response from the server.";

pub const ORDER_FORM_INVALID: &str = "Please fill out all required fields and agree to the terms.";
pub const ORDER_LOGIN_REQUIRED: &str = "You need to log in to place an order.";
pub const ORDER_PLACED: &str = "Order placed successfully!";
pub const ORDER_FAILED: &str = "Failed to place order. Please try again.";

pub const ORDERS_LOGIN_REQUIRED: &str = "You need to log in to view your orders.";
pub const ORDERS_FETCH_FAILED: &str = "Failed to fetch orders. Please try again.";

pub const ORDER_CANCELLED: &str = "Order cancelled successfully!";
pub const ORDER_CANCEL_FAILED: &str = "Failed to cancel the order. Please try again.";

pub fn register_refused(message: Option<&str>) -> String {
    format!("Registration failed: {}", message.unwrap_or(REGISTER_REFUSED_FALLBACK))
}

pub fn register_error(message: &str) -> String {
    format!("Error: {}", message)
}

pub fn register_http_error(status: u16, reason: &str) -> String {
    format!("An error occurred during registration. Status: {} - {}", status, reason)
}

pub fn register_unexpected(detail: &str) -> String {
    format!("An error occurred during registration. {}", detail)
}
