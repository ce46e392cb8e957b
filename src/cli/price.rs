//! Price lookup commands

use super::build_client;
use crate::config::Config;
use crate::quote::normalize_symbol;
use clap::Args;

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Symbol to look up (e.g. AAPL, BTC/USD)
    pub symbol: String,
}

impl PriceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = build_client(config)?;
        let quote = client.get_quote(&normalize_symbol(&self.symbol)).await?;
        println!("{:<12} {}", quote.symbol, quote.price);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct PricesArgs {
    /// Symbols to look up in one request
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

impl PricesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = build_client(config)?;
        let symbols: Vec<String> = self.symbols.iter().map(|s| normalize_symbol(s)).collect();
        let prices = client.get_prices(&symbols).await?;

        for symbol in &symbols {
            match prices.get(symbol) {
                Some(price) => println!("{:<12} {}", symbol, price),
                None => println!("{:<12} -", symbol),
            }
        }
        Ok(())
    }
}
