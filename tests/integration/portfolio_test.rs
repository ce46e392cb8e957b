//! Integration tests for portfolio refresh

use crate::common::client_with;
use chrono::{TimeZone, Utc};
use quote_tracker::portfolio::{AssetKind, Holding, Portfolio, Valuation};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn test_refresh_then_value() {
    let (client, _transport) = client_with(json!({
        "AAPL": {"price": "200"},
        "BTC/USD": {"price": "40000"}
    }));

    let mut portfolio = Portfolio {
        holdings: vec![
            Holding::new("Apple", "nasdaq:aapl", AssetKind::Stock, dec!(10), dec!(150)),
            Holding::new("Bitcoin", "BTC", AssetKind::Crypto, dec!(0.5), dec!(30000)),
        ],
    };

    let day1 = Utc.with_ymd_and_hms(2024, 5, 6, 14, 0, 0).unwrap();
    let outcome = portfolio.refresh_at(&client, day1).await;
    assert_eq!(outcome.updated, 2);

    let apple = Valuation::of(&portfolio.holdings[0]).unwrap();
    assert_eq!(apple.current_value, dec!(2000));
    assert_eq!(apple.total_change_pct, dec!(33.33));
    assert_eq!(apple.daily_change_pct, dec!(0));

    let btc = Valuation::of(&portfolio.holdings[1]).unwrap();
    assert_eq!(btc.current_value, dec!(20000));
    assert_eq!(btc.total_change_pct, dec!(33.33));

    assert_eq!(portfolio.total_value(), dec!(22000));
}

#[tokio::test]
async fn test_refresh_next_day_tracks_daily_change() {
    let (client, transport) = client_with(json!({"price": "200"}));
    transport.push(json!({"price": "180"}));

    let mut portfolio = Portfolio {
        holdings: vec![Holding::new("Apple", "AAPL", AssetKind::Stock, dec!(1), dec!(100))],
    };

    let day1 = Utc.with_ymd_and_hms(2024, 5, 6, 14, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2024, 5, 7, 14, 0, 0).unwrap();
    portfolio.refresh_at(&client, day1).await;
    portfolio.refresh_at(&client, day2).await;

    let v = Valuation::of(&portfolio.holdings[0]).unwrap();
    assert_eq!(v.price, dec!(200));
    assert_eq!(v.daily_change_pct, dec!(11.11));
    assert_eq!(v.ytd_change_pct, dec!(11.11));
}
