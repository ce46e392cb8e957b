//! Configuration loading tests

use quote_tracker::config::Config;

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.provider.request_limit, 8);
    assert_eq!(config.provider.window_secs, 60);
    assert_eq!(config.poller.symbols, vec!["AAPL", "MSFT", "BTC/USD"]);
}

#[test]
fn test_holdings_example_loads() {
    let portfolio: quote_tracker::portfolio::Portfolio =
        toml::from_str(include_str!("../../holdings.toml.example")).unwrap();
    assert_eq!(portfolio.holdings.len(), 3);
    assert_eq!(
        portfolio.quote_symbols(),
        vec!["AAPL", "OTP", "BTC/USD"]
    );
}
