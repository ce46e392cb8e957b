//! Ticker normalization for quote lookups

/// Quote currency used for crypto pairs
pub const CRYPTO_QUOTE_CURRENCY: &str = "USD";

/// Strip an exchange prefix and normalize case
///
/// `"NASDAQ:aapl "` becomes `"AAPL"`.
pub fn normalize_symbol(symbol: &str) -> String {
    let ticker = symbol.rsplit(':').next().unwrap_or(symbol);
    ticker.trim().to_uppercase()
}

/// Provider pair for a crypto asset (`"btc"` becomes `"BTC/USD"`)
pub fn crypto_pair(symbol: &str) -> String {
    let normalized = normalize_symbol(symbol);
    if normalized.contains('/') {
        normalized
    } else {
        format!("{}/{}", normalized, CRYPTO_QUOTE_CURRENCY)
    }
}

/// Drop duplicates while keeping first-seen order
pub fn dedup_symbols<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = std::collections::HashSet::new();
    symbols
        .into_iter()
        .map(Into::into)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
