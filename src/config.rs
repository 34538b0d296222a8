//! Configuration management for pts_client
//!
//! Settings come from built-in defaults, an optional TOML file and `PTS_*`
//! environment variables, in increasing order of precedence.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "pts-client.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_FILE: &str = ".pts-session.json";
pub const DEFAULT_ORDERS_USER: &str = "me";
pub const DEFAULT_MOCK_BIND: &str = "127.0.0.1:8080";
pub const ENV_PREFIX: &str = "PTS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the delivery backend
    pub api_base_url: String,
    /// Where the session token is persisted
    pub session_file: PathBuf,
    /// User reference used when listing orders; `me` lets the backend
    /// resolve the user from the bearer token
    pub orders_user: String,
    /// Listen address of the mock backend binary
    pub mock_bind: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            orders_user: DEFAULT_ORDERS_USER.to_string(),
            mock_bind: DEFAULT_MOCK_BIND.to_string(),
        }
    }
}

/// Load configuration from `PTS_CONFIG` (or `pts-client.toml`) and the
/// environment
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let file = env::var("PTS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    build_config(Some(Path::new(&file)), Some(Environment::with_prefix(ENV_PREFIX)))
}

/// Load configuration from a file only, ignoring the environment
pub fn load_config_from_file(path: &Path) -> Result<ClientConfig, ConfigError> {
    build_config(Some(path), None)
}

fn build_config(
    file: Option<&Path>,
    environment: Option<Environment>,
) -> Result<ClientConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("session_file", DEFAULT_SESSION_FILE)?
        .set_default("orders_user", DEFAULT_ORDERS_USER)?
        .set_default("mock_bind", DEFAULT_MOCK_BIND)?;

    if let Some(path) = file {
        builder = builder.add_source(File::from(path).required(false));
    }
    if let Some(environment) = environment {
        builder = builder.add_source(environment);
    }

    let config: ClientConfig = builder.build()?.try_deserialize()?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration values
fn validate_config(config: &ClientConfig) -> Result<(), ConfigError> {
    let base_url = config.api_base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::Invalid("API base URL can't be empty".to_string()));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Invalid(format!(
            "API base URL must start with http:// or https://, got {}",
            base_url
        )));
    }

    if config.orders_user.trim().is_empty() || config.orders_user.contains('/') {
        return Err(ConfigError::Invalid(
            "Orders user must be a single non-empty path segment".to_string(),
        ));
    }

    if config.session_file.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("Session file path can't be empty".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = load_config_from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts-client.toml");
        fs::write(
            &path,
            "api_base_url = \"https://pts.example.com\"\norders_user = \"12345\"\n",
        )
        .unwrap();

        let config = load_config_from_file(&path).unwrap();
        assert_eq!(config.api_base_url, "https://pts.example.com");
        assert_eq!(config.orders_user, "12345");
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[test]
    fn test_validate_config_rejects_bad_url() {
        let config = ClientConfig {
            api_base_url: "localhost:8080".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(validate_config(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_config_rejects_empty_orders_user() {
        let config = ClientConfig {
            orders_user: "  ".to_string(),
            ..ClientConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
