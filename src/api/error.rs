//! Client-side error taxonomy
//!
//! Every failed exchange with the backend lands in exactly one of these
//! buckets, which is what the views branch on when choosing an alert.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No response at all: connection refused, DNS failure, reset
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 401
    #[error("Session expired or invalid")]
    Unauthorized,

    /// The server answered with a machine-readable error payload
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Any other non-success status
    #[error("HTTP error {status}: {reason}")]
    Http {
        status: u16,
        reason: String,
    },

    /// A success reply whose body does not fit the endpoint's shape
    #[error("Invalid response from the server: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify a non-success reply from its status and raw body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized;
        }

        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(payload)) => {
                let message = payload
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| Value::Object(payload.clone()).to_string());
                ClientError::Api {
                    status: status.as_u16(),
                    message,
                }
            },
            Ok(Value::String(message)) if !message.is_empty() => ClientError::Api {
                status: status.as_u16(),
                message,
            },
            _ => ClientError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_wins_over_payload() {
        let error = ClientError::from_response(StatusCode::UNAUTHORIZED, r#"{"message":"nope"}"#);
        assert!(matches!(error, ClientError::Unauthorized));
    }

    #[test]
    fn test_structured_payload_message_is_kept() {
        let error =
            ClientError::from_response(StatusCode::CONFLICT, r#"{"message":"Email already registered"}"#);
        match error {
            ClientError::Api {
                status,
                message,
            } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Email already registered");
            },
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn test_structured_payload_without_message_is_rendered() {
        let error = ClientError::from_response(StatusCode::BAD_REQUEST, r#"{"error":"bad phone"}"#);
        match error {
            ClientError::Api {
                message,
                ..
            } => assert_eq!(message, r#"{"error":"bad phone"}"#),
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_is_unclassified() {
        let error =
            ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "Could not register user\n");
        match error {
            ClientError::Http {
                status,
                reason,
            } => {
                assert_eq!(status, 500);
                assert_eq!(reason, "Internal Server Error");
            },
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
