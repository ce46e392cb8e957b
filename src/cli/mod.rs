//! CLI interface for quote-tracker
//!
//! Provides subcommands for:
//! - `price`: Fetch one symbol
//! - `prices`: Fetch several symbols in one request
//! - `watch`: Poll prices on an interval
//! - `portfolio`: Value a holdings file at current prices
//! - `config`: Show configuration

mod portfolio;
mod price;
mod watch;

pub use portfolio::PortfolioArgs;
pub use price::{PriceArgs, PricesArgs};
pub use watch::WatchArgs;

use crate::config::Config;
use crate::quote::QuotePriceClient;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quote-tracker")]
#[command(about = "Rate-limited market prices and portfolio valuation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the current price of one symbol
    Price(PriceArgs),
    /// Fetch several symbols in a single request
    Prices(PricesArgs),
    /// Poll prices on an interval
    Watch(WatchArgs),
    /// Value a holdings file at current prices
    Portfolio(PortfolioArgs),
    /// Show configuration
    Config,
}

/// Build a quote client from configuration and environment
pub fn build_client(config: &Config) -> anyhow::Result<QuotePriceClient> {
    let client = QuotePriceClient::new(config.provider.client_config())?;
    Ok(client)
}
