//! Integration tests for the quote price client

use crate::common::{client_with, MockTransport};
use quote_tracker::quote::{
    LimiterState, QuoteClientConfig, QuoteError, QuotePriceClient, DEFAULT_REQUEST_LIMIT,
};
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[tokio::test(start_paused = true)]
async fn test_eight_calls_then_rate_limited() {
    let (client, transport) = client_with(json!({"price": "189.12"}));

    for _ in 0..DEFAULT_REQUEST_LIMIT {
        assert_ok!(client.get_price("AAPL").await);
    }
    assert_eq!(client.limiter().state(), LimiterState::Exhausted);

    let err = client.get_price("AAPL").await.unwrap_err();
    assert!(err.is_rate_limited());
    // The rejected call never reached the provider
    assert_eq!(transport.calls().len(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_window_rolls_over_after_61_seconds() {
    let (client, transport) = client_with(json!({"price": "189.12"}));

    for _ in 0..DEFAULT_REQUEST_LIMIT {
        assert_ok!(client.get_price("AAPL").await);
    }
    tokio::time::advance(Duration::from_secs(61)).await;

    assert_eq!(client.limiter().state(), LimiterState::Open);
    assert_ok!(client.get_price("AAPL").await);
    assert_eq!(client.limiter().snapshot().request_count, 1);
    assert_eq!(transport.calls().len(), 9);
}

#[tokio::test(start_paused = true)]
async fn test_still_limited_just_before_rollover() {
    let (client, _transport) = client_with(json!({"price": "1"}));

    for _ in 0..DEFAULT_REQUEST_LIMIT {
        assert_ok!(client.get_price("AAPL").await);
    }
    tokio::time::advance(Duration::from_secs(59)).await;

    match client.get_price("AAPL").await {
        Err(QuoteError::RateLimitExceeded { retry_after }) => {
            assert_eq!(retry_after, Duration::from_secs(1));
        }
        other => panic!("expected rate limit, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_batch_consumes_one_unit() {
    let (client, _transport) = client_with(json!({
        "AAPL": {"price": "1"},
        "MSFT": {"price": "2"},
        "GOOG": {"price": "3"}
    }));

    for _ in 0..DEFAULT_REQUEST_LIMIT {
        let prices = client.get_prices(&["AAPL", "MSFT", "GOOG"]).await.unwrap();
        assert_eq!(prices.len(), 3);
    }
    assert_err!(client.get_prices(&["AAPL", "MSFT", "GOOG"]).await);
}

#[tokio::test]
async fn test_single_symbol_batch_flat_shape() {
    let (client, transport) = client_with(json!({"price": "35000.00"}));

    let prices = client.get_prices(&["BTC/USD"]).await.unwrap();

    assert_eq!(prices.len(), 1);
    assert_eq!(prices["BTC/USD"], dec!(35000.00));
    assert_eq!(transport.calls()[0].param("symbol"), Some("BTC/USD"));
}

#[tokio::test]
async fn test_multi_symbol_batch_omits_bad_price() {
    let (client, transport) = client_with(json!({
        "BTC/USD": {"price": "35000"},
        "ETH/USD": {"price": "bad"}
    }));

    let prices = client.get_prices(&["BTC/USD", "ETH/USD"]).await.unwrap();

    assert_eq!(prices.len(), 1);
    assert_eq!(prices["BTC/USD"], dec!(35000));
    assert!(!prices.contains_key("ETH/USD"));
    assert_eq!(transport.calls()[0].param("symbol"), Some("BTC/USD,ETH/USD"));
}

#[tokio::test]
async fn test_multi_symbol_keys_match_request() {
    let (client, _transport) = client_with(json!({
        "AAPL": {"price": "189.12"},
        "MSFT": {"price": "402.5"}
    }));

    let prices = client.get_prices(&["AAPL", "MSFT"]).await.unwrap();

    let mut keys: Vec<_> = prices.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["AAPL", "MSFT"]);
}

#[tokio::test]
async fn test_get_price_invalid_response() {
    let (client, _transport) = client_with(json!({"price": "n/a"}));
    let err = client.get_price("AAPL").await.unwrap_err();
    assert!(matches!(err, QuoteError::InvalidResponse(_)));

    let (client, _transport) = client_with(json!({"symbol": "AAPL"}));
    let err = client.get_price("AAPL").await.unwrap_err();
    assert!(matches!(err, QuoteError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_get_price_provider_error_payload() {
    let (client, _transport) = client_with(json!({
        "code": 400,
        "message": "**symbol** not found: NOPE",
        "status": "error"
    }));

    let err = client.get_price("NOPE").await.unwrap_err();
    assert!(matches!(err, QuoteError::Provider { status: Some(400), .. }));
    assert!(!err.is_rate_limited());
}

#[tokio::test]
async fn test_provider_side_rate_limit_is_distinguishable() {
    let (client, _transport) = client_with(json!({
        "code": 429,
        "message": "You have run out of API credits for the current minute.",
        "status": "error"
    }));

    let err = client.get_price("AAPL").await.unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let transport = Arc::new(MockTransport::new());
    transport.push_err(QuoteError::Provider {
        status: None,
        message: "connection reset".to_string(),
    });
    let client =
        QuotePriceClient::with_transport(QuoteClientConfig::with_api_key("k"), transport).unwrap();

    let err = client.get_prices(&["AAPL", "MSFT"]).await.unwrap_err();
    assert!(matches!(err, QuoteError::Provider { status: None, .. }));
}

#[test]
fn test_missing_key_fails_before_network() {
    let transport = Arc::new(MockTransport::with_default(json!({"price": "1"})));

    let result = QuotePriceClient::with_transport(QuoteClientConfig::default(), transport.clone());

    assert!(matches!(result, Err(QuoteError::Configuration(_))));
    assert!(transport.calls().is_empty());
    assert!(matches!(
        QuotePriceClient::new(QuoteClientConfig::default()),
        Err(QuoteError::Configuration(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_share_quota() {
    let (client, transport) = client_with(json!({"price": "1"}));
    let client = Arc::new(client);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_price("AAPL").await.is_ok() })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, DEFAULT_REQUEST_LIMIT as usize);
    assert_eq!(transport.calls().len(), DEFAULT_REQUEST_LIMIT as usize);
}
