//! Portfolio command implementation

use super::build_client;
use crate::config::Config;
use crate::portfolio::Portfolio;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// TOML file of [[holdings]] tables
    pub holdings: PathBuf,

    /// Write refreshed prices back to the holdings file
    #[arg(short, long)]
    pub save: bool,
}

impl PortfolioArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut portfolio = Portfolio::load(&self.holdings)?;
        let client = build_client(config)?;

        let outcome = portfolio.refresh(&client).await;
        if let Some(e) = &outcome.error {
            eprintln!("Warning: prices not refreshed ({}), showing last known values", e);
        }

        if self.save && outcome.updated > 0 {
            portfolio.save(&self.holdings)?;
            tracing::info!(path = ?self.holdings, "Saved refreshed holdings");
        }

        println!(
            "{:<16} {:<10} {:>12} {:>14} {:>9} {:>9} {:>9}",
            "Name", "Symbol", "Price", "Value", "Total %", "Day %", "YTD %"
        );
        for (holding, v) in portfolio.valuations() {
            println!(
                "{:<16} {:<10} {:>12} {:>14} {:>9} {:>9} {:>9}",
                holding.name,
                holding.quote_symbol(),
                v.price.round_dp(2),
                v.current_value.round_dp(2),
                v.total_change_pct,
                v.daily_change_pct,
                v.ytd_change_pct
            );
        }
        println!(
            "Total value {} (cost {}, {}%), {} of {} holdings updated",
            portfolio.total_value().round_dp(2),
            portfolio.total_cost().round_dp(2),
            portfolio.total_change_pct(),
            outcome.updated,
            portfolio.holdings.len()
        );
        Ok(())
    }
}
