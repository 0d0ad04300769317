//! Error types for the queuectl SDK
//!
//! Every fallible SDK operation returns [`QueuectlError`]. Failures fall in three
//! groups:
//!
//! - **Argument validation** ([`QueuectlError::InvalidArgument`],
//!   [`QueuectlError::MissingCredentials`]) is raised before any request is made.
//! - **Transport** ([`QueuectlError::Http`], [`QueuectlError::Json`],
//!   [`QueuectlError::Url`]) comes from the HTTP layer.
//! - **API envelope failures** ([`QueuectlError::Api`]) carry every error item the
//!   server reported in a `success: false` envelope.
//!
//! # Example
//!
//! ```rust
//! use queuectl_sdk::{ApiErrorItem, QueuectlError};
//!
//! let error = QueuectlError::Api {
//!     errors: vec![ApiErrorItem { code: 10000, message: "Authentication error".into() }],
//! };
//!
//! match error {
//!     QueuectlError::Api { errors } => assert_eq!(errors[0].code, 10000),
//!     other => panic!("unexpected error: {other}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for queuectl SDK operations
pub type Result<T> = std::result::Result<T, QueuectlError>;

/// A single error item from an API response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorItem {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for ApiErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [code: {}]", self.message, self.code)
    }
}

/// Error types that can occur when using the queuectl SDK
#[derive(Error, Debug)]
pub enum QueuectlError {
    /// The API answered with `success: false`
    #[error("A request to the API failed: {}", format_api_errors(.errors))]
    Api { errors: Vec<ApiErrorItem> },

    /// The API answered with `success: true` but no `result`
    #[error("API response for {path} did not contain a result")]
    MissingResult { path: String },

    /// Error from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error from serde JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid API base URL or request path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A command-line argument failed validation
    #[error("{0}")]
    InvalidArgument(String),

    /// Account id or API token could not be resolved
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Generic error with message
    #[error("queuectl SDK error: {0}")]
    Generic(String),
}

impl QueuectlError {
    /// Returns true if any error item in an API failure carries `code`
    #[must_use]
    pub fn has_api_code(&self, code: i64) -> bool {
        match self {
            Self::Api { errors } => errors.iter().any(|e| e.code == code),
            _ => false,
        }
    }
}

fn format_api_errors(errors: &[ApiErrorItem]) -> String {
    if errors.is_empty() {
        return "no error details were returned".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
