//! Session management for the client.
//!
//! The only state shared between views is the opaque bearer token handed out
//! at login. Views never reach for it through a global: they are given a
//! [`SessionStore`] when they are constructed.

pub mod file_store;

pub use file_store::FileSessionStore;

use std::fmt;
use std::sync::Mutex;
use thiserror::Error;

/// Storage key the token lives under
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Opaque bearer token issued by the backend
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Read/write capability over the persisted session token
pub trait SessionStore: Send + Sync {
    /// Currently stored token, if any
    fn token(&self) -> Result<Option<SessionToken>, SessionError>;

    /// Persist a token, replacing any previous one
    fn save_token(&self, token: &SessionToken) -> Result<(), SessionError>;

    /// Forget the stored token
    fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local session store
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<SessionToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(SessionToken::new(token))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Result<Option<SessionToken>, SessionError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save_token(&self, token: &SessionToken) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("secret-value");
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
        assert_eq!(token.as_str(), "secret-value");
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(store.token().unwrap().is_none());

        store.save_token(&SessionToken::new("abc")).unwrap();
        assert_eq!(store.token().unwrap(), Some(SessionToken::new("abc")));

        store.clear().unwrap();
        assert!(store.token().unwrap().is_none());
    }
}
