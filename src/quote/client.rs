//! Rate-limited Twelve Data price client

use super::limiter::{RateLimiter, DEFAULT_REQUEST_LIMIT, DEFAULT_WINDOW};
use super::response::{parse_prices, parse_single};
use super::symbol::dedup_symbols;
use super::transport::{HttpTransport, QuoteTransport, DEFAULT_TIMEOUT};
use super::{PriceQuote, QuoteError};
use crate::telemetry::{record_request, set_window_remaining, RequestOutcome};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Twelve Data REST base URL
pub const TWELVE_DATA_API_URL: &str = "https://api.twelvedata.com";

/// Configuration for the quote client
#[derive(Debug, Clone)]
pub struct QuoteClientConfig {
    /// Provider API key; construction fails without one
    pub api_key: Option<String>,
    /// Base URL for the provider API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Requests admitted per window
    pub request_limit: u32,
    /// Window length
    pub window: Duration,
}

impl Default for QuoteClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: TWELVE_DATA_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            request_limit: DEFAULT_REQUEST_LIMIT,
            window: DEFAULT_WINDOW,
        }
    }
}

impl QuoteClientConfig {
    /// Default configuration with the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

/// Client for the provider's `/price` endpoint
///
/// Every call passes through a fixed-window limiter first. When the window is
/// exhausted the call fails immediately with [`QuoteError::RateLimitExceeded`];
/// nothing is queued or retried here.
pub struct QuotePriceClient {
    api_key: String,
    price_url: String,
    limiter: RateLimiter,
    transport: Arc<dyn QuoteTransport>,
}

impl QuotePriceClient {
    /// Create a client that talks HTTP to the configured provider
    pub fn new(config: QuoteClientConfig) -> Result<Self, QuoteError> {
        // Validate before building anything network-facing
        require_api_key(&config)?;
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport
    pub fn with_transport(
        config: QuoteClientConfig,
        transport: Arc<dyn QuoteTransport>,
    ) -> Result<Self, QuoteError> {
        let api_key = require_api_key(&config)?;

        tracing::info!(
            api_key = %mask_key(&api_key),
            base_url = %config.base_url,
            request_limit = config.request_limit,
            window_secs = config.window.as_secs(),
            "Initialized quote price client"
        );

        Ok(Self {
            api_key,
            price_url: format!("{}/price", config.base_url.trim_end_matches('/')),
            limiter: RateLimiter::new(config.request_limit, config.window),
            transport,
        })
    }

    /// Limiter guarding this client
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Current price for one symbol
    pub async fn get_price(&self, symbol: &str) -> Result<Decimal, QuoteError> {
        self.acquire(symbol)?;

        tracing::debug!(symbol, "Fetching price");
        let body = self.fetch(symbol).await?;

        match parse_single(symbol, &body) {
            Ok(price) => {
                record_request(RequestOutcome::Success);
                tracing::debug!(symbol, %price, "Fetched price");
                Ok(price)
            }
            Err(e) => {
                record_request(outcome_for(&e));
                tracing::error!(symbol, error = %e, body = %body, "Failed to parse price");
                Err(e)
            }
        }
    }

    /// Current price for one symbol, stamped with the fetch time
    pub async fn get_quote(&self, symbol: &str) -> Result<PriceQuote, QuoteError> {
        let price = self.get_price(symbol).await?;
        Ok(PriceQuote {
            symbol: symbol.to_string(),
            price,
            fetched_at: Utc::now(),
        })
    }

    /// Prices for a batch of symbols in a single request
    ///
    /// Consumes one unit of quota for the whole batch. Symbols the provider
    /// could not resolve are absent from the returned map.
    pub async fn get_prices<S: AsRef<str>>(
        &self,
        symbols: &[S],
    ) -> Result<HashMap<String, Decimal>, QuoteError> {
        let symbols = dedup_symbols(symbols.iter().map(|s| s.as_ref()));
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }

        let joined = symbols.join(",");
        self.acquire(&joined)?;

        tracing::debug!(symbols = %joined, "Fetching batch prices");
        let body = self.fetch(&joined).await?;

        match parse_prices(&symbols, &body) {
            Ok(prices) => {
                record_request(RequestOutcome::Success);
                tracing::debug!(
                    requested = symbols.len(),
                    resolved = prices.len(),
                    "Fetched batch prices"
                );
                Ok(prices)
            }
            Err(e) => {
                record_request(outcome_for(&e));
                tracing::error!(symbols = %joined, error = %e, "Batch price request failed");
                Err(e)
            }
        }
    }

    fn acquire(&self, symbols: &str) -> Result<(), QuoteError> {
        let result = self.limiter.try_acquire();
        set_window_remaining(self.limiter.remaining());

        if let Err(ref e) = result {
            record_request(RequestOutcome::RateLimited);
            tracing::warn!(symbols, error = %e, "Quote request rejected by rate limiter");
        }
        result
    }

    async fn fetch(&self, symbol: &str) -> Result<serde_json::Value, QuoteError> {
        let query = [("symbol", symbol), ("apikey", self.api_key.as_str())];
        self.transport
            .get_json(&self.price_url, &query)
            .await
            .inspect_err(|e| {
                record_request(outcome_for(e));
                tracing::error!(symbol, error = %e, "Price request failed");
            })
    }
}

fn require_api_key(config: &QuoteClientConfig) -> Result<String, QuoteError> {
    match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => {
            tracing::error!("Quote provider API key is not configured");
            Err(QuoteError::Configuration(
                "Quote provider API key is not configured".to_string(),
            ))
        }
    }
}

fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}...", prefix)
}

fn outcome_for(err: &QuoteError) -> RequestOutcome {
    match err {
        QuoteError::RateLimitExceeded { .. } => RequestOutcome::RateLimited,
        QuoteError::InvalidResponse(_) => RequestOutcome::InvalidResponse,
        _ => RequestOutcome::ProviderError,
    }
}
