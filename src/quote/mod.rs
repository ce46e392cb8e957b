//! Quote price module
//!
//! Rate-limited price lookups against the Twelve Data `/price` endpoint

mod client;
mod error;
mod limiter;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod response;
mod symbol;
mod transport;

pub use client::{QuoteClientConfig, QuotePriceClient, TWELVE_DATA_API_URL};
pub use error::QuoteError;
pub use limiter::{LimiterState, RateLimiter, RateWindow, DEFAULT_REQUEST_LIMIT, DEFAULT_WINDOW};
pub use response::{parse_prices, parse_single};
pub use symbol::{crypto_pair, dedup_symbols, normalize_symbol, CRYPTO_QUOTE_CURRENCY};
pub use transport::{HttpTransport, QuoteTransport, DEFAULT_TIMEOUT};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price fetched from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Symbol as requested
    pub symbol: String,
    /// Last traded price
    pub price: Decimal,
    /// Local time the price was received
    pub fetched_at: DateTime<Utc>,
}
