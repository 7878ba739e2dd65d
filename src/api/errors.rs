//! Country API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        url: String,
        reason: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Country API error (status {status_code}): {message}")]
    Status {
        status_code: u16,
        message: String,
    },

    #[error("Failed to parse response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Country '{0}' not found")]
    NotFound(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}
