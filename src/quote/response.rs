//! Twelve Data `/price` response mapping
//!
//! The endpoint answers a single-symbol request with a flat object
//! (`{"price": "189.12"}`) and a comma-joined request with an object keyed by
//! symbol (`{"AAPL": {"price": "189.12"}, "MSFT": {...}}`). Both shapes are
//! mapped here so callers only ever see `symbol -> price`.

use super::QuoteError;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

/// Raw price object as returned by the provider
#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: Option<Value>,
    status: Option<String>,
    message: Option<String>,
    code: Option<u16>,
}

impl PriceResponse {
    fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    /// Rate limiting and bad credentials apply to every symbol in the request
    fn is_fatal(&self) -> bool {
        matches!(self.code, Some(401) | Some(403) | Some(429))
    }

    fn into_error(self) -> QuoteError {
        if self.code == Some(429) {
            return QuoteError::RateLimitExceeded {
                retry_after: Duration::ZERO,
            };
        }
        QuoteError::provider(
            self.code,
            self.message.unwrap_or_else(|| "API error".to_string()),
        )
    }
}

/// Parse a flat `{"price": ...}` body for one symbol
pub fn parse_single(symbol: &str, body: &Value) -> Result<Decimal, QuoteError> {
    let response = PriceResponse::deserialize(body).map_err(|e| {
        QuoteError::InvalidResponse(format!("Unexpected body for {symbol}: {e}"))
    })?;

    if response.is_error() || response.code == Some(429) {
        return Err(response.into_error());
    }

    let raw = response
        .price
        .ok_or_else(|| QuoteError::InvalidResponse(format!("Missing price for {symbol}")))?;

    parse_decimal(&raw)
        .ok_or_else(|| QuoteError::InvalidResponse(format!("Invalid price for {symbol}: {raw}")))
}

/// Map a batch body to `symbol -> price` for the requested symbols
///
/// Symbols whose entry is missing or unparseable are left out of the map.
/// Errors that affect the whole request (rate limit, credentials) fail the call.
pub fn parse_prices(symbols: &[String], body: &Value) -> Result<HashMap<String, Decimal>, QuoteError> {
    let mut prices = HashMap::with_capacity(symbols.len());

    match symbols {
        [] => {}
        [symbol] => match parse_single(symbol, body) {
            Ok(price) => {
                prices.insert(symbol.clone(), price);
            }
            Err(e) if is_batch_fatal(&e) => return Err(e),
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Dropping unresolved symbol");
            }
        },
        _ => {
            let entries = body.as_object().ok_or_else(|| {
                QuoteError::InvalidResponse(format!("Expected object keyed by symbol, got {body}"))
            })?;

            // A top-level error object means the request itself was rejected
            if let Ok(top) = PriceResponse::deserialize(body) {
                if top.is_error() || top.is_fatal() {
                    return Err(top.into_error());
                }
            }

            for symbol in symbols {
                let Some(entry) = entries.get(symbol) else {
                    tracing::warn!(symbol = %symbol, "Symbol missing from batch response");
                    continue;
                };
                match parse_single(symbol, entry) {
                    Ok(price) => {
                        prices.insert(symbol.clone(), price);
                    }
                    Err(e) => {
                        tracing::warn!(symbol = %symbol, error = %e, "Dropping unresolved symbol");
                    }
                }
            }
        }
    }

    Ok(prices)
}

fn is_batch_fatal(err: &QuoteError) -> bool {
    match err {
        QuoteError::RateLimitExceeded { .. } => true,
        QuoteError::Provider { status, .. } => matches!(status, Some(401) | Some(403)),
        _ => false,
    }
}

/// Prices arrive as decimal strings; plain JSON numbers are accepted too
fn parse_decimal(raw: &Value) -> Option<Decimal> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
