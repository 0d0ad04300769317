//! Configuration management for the queuectl CLI
//!
//! Values come from environment variables with sensible defaults. Global
//! command-line flags override them.

use queuectl_sdk::{QueuectlError, Result};
use std::{env, time::Duration};
use url::Url;

/// Default API root
pub const DEFAULT_API_URL: &str = "https://api.cloudflare.com/client/v4";

/// Centralized configuration for the queuectl CLI
#[derive(Debug, Clone)]
pub struct QueuectlConfig {
    /// API root every request path is joined to
    pub api_url: String,

    /// Bearer token for the API
    pub api_token: Option<String>,

    /// Account that owns the event subscriptions
    pub account_id: Option<String>,

    /// Default output format for CLI commands
    pub default_output_format: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl QueuectlConfig {
    /// Create a new configuration instance with values from environment variables
    /// or sensible defaults if not set
    #[must_use]
    pub fn new() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("QUEUECTL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),

            api_token: non_empty("QUEUECTL_API_TOKEN"),

            account_id: non_empty("QUEUECTL_ACCOUNT_ID"),

            default_output_format: non_empty("QUEUECTL_DEFAULT_OUTPUT_FORMAT")
                .unwrap_or_else(|| "human".to_string()),

            request_timeout_secs: non_empty("QUEUECTL_REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Apply command-line overrides on top of the environment
    #[must_use]
    pub fn with_overrides(mut self, api_url: Option<&str>, account_id: Option<&str>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url.to_string();
        }
        if let Some(account_id) = account_id {
            self.account_id = Some(account_id.to_string());
        }
        self
    }

    /// Parsed API root
    ///
    /// # Errors
    /// Returns an error if the configured URL is not absolute
    pub fn api_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.api_url)?)
    }

    /// The account to operate on
    ///
    /// # Errors
    /// Returns `QueuectlError::MissingCredentials` when no account id is configured
    pub fn require_account_id(&self) -> Result<&str> {
        self.account_id.as_deref().ok_or_else(|| {
            QueuectlError::MissingCredentials(
                "no account id configured. Set QUEUECTL_ACCOUNT_ID or pass --account-id"
                    .to_string(),
            )
        })
    }

    /// The API token to authenticate with
    ///
    /// # Errors
    /// Returns `QueuectlError::MissingCredentials` when no token is configured
    pub fn require_api_token(&self) -> Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            QueuectlError::MissingCredentials("no API token configured. Set QUEUECTL_API_TOKEN".to_string())
        })
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for QueuectlConfig {
    fn default() -> Self {
        Self::new()
    }
}
