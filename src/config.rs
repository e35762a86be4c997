//! Server configuration loaded from environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the SearXNG MCP server.
///
/// Loaded once at startup and shared read-only by the service and the
/// HTTP client for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the SearXNG instance, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Logging verbosity level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Maximum permissible value for `max_results` in a query.
    pub max_results_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
            log_level: "info".to_string(),
            max_results_limit: 50,
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables.
    ///
    /// Recognized variables: `SEARXNG_BASE_URL`, `SEARXNG_TIMEOUT`,
    /// `LOG_LEVEL`, `MAX_RESULTS_LIMIT`. Unset or unparseable values fall
    /// back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = env::var("SEARXNG_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let timeout_secs = env::var("SEARXNG_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        let max_results_limit = env::var("MAX_RESULTS_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_results_limit);

        let config = Self {
            base_url,
            timeout_secs,
            log_level,
            max_results_limit,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "SearXNG base URL cannot be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_results_limit == 0 || self.max_results_limit > 100 {
            return Err(ConfigError::Invalid(format!(
                "Max results limit must be between 1 and 100, got {}",
                self.max_results_limit
            )));
        }

        Ok(())
    }
}
