//! HTTP transport for the quote client

use super::QuoteError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues GET requests and returns the decoded JSON body
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    /// GET `url` with the given query parameters
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, QuoteError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl QuoteTransport for HttpTransport {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, QuoteError> {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!(url, "Provider returned 429");
                return Err(QuoteError::RateLimitExceeded {
                    retry_after: Duration::ZERO,
                });
            }
            return Err(QuoteError::provider(Some(status.as_u16()), body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| QuoteError::InvalidResponse(format!("Body is not JSON: {e}")))
    }
}
