//! Quote client errors

use std::time::Duration;
use thiserror::Error;

/// Errors returned by the quote price client
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Client could not be constructed (missing API key, bad HTTP setup)
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Provider quota exhausted for the current window
    #[error("Rate limit exceeded, retry in {}s", retry_after.as_secs())]
    RateLimitExceeded {
        /// Time until the current window rolls over
        retry_after: Duration,
    },
    /// Transport failure, non-success status or provider error payload
    #[error("Provider error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Provider {
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Provider or transport message
        message: String,
    },
    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl QuoteError {
    /// True when the caller should retry later rather than treat this as a failure
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, QuoteError::RateLimitExceeded { .. })
    }

    pub(crate) fn provider(status: Option<u16>, message: impl Into<String>) -> Self {
        QuoteError::Provider {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        QuoteError::provider(err.status().map(|s| s.as_u16()), err.to_string())
    }
}
