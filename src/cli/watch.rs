//! Watch command implementation

use super::build_client;
use crate::config::Config;
use crate::poller::PricePoller;
use crate::quote::normalize_symbol;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between polls (defaults to poller.interval_secs)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Symbols to poll (defaults to poller.symbols)
    pub symbols: Vec<String>,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let symbols: Vec<String> = if self.symbols.is_empty() {
            config.poller.symbols.clone()
        } else {
            self.symbols.clone()
        };
        if symbols.is_empty() {
            anyhow::bail!("No symbols given and poller.symbols is empty");
        }
        let symbols: Vec<String> = symbols.iter().map(|s| normalize_symbol(s)).collect();

        let interval = Duration::from_secs(self.interval.unwrap_or(config.poller.interval_secs));
        let client = Arc::new(build_client(config)?);
        let mut rx = PricePoller::new(client, symbols.clone())
            .interval(interval)
            .spawn();

        loop {
            tokio::select! {
                update = rx.recv() => {
                    let Some(update) = update else { break };
                    for symbol in &symbols {
                        if let Some(price) = update.prices.get(symbol) {
                            println!("{} {:<12} {}", update.fetched_at.format("%H:%M:%S"), symbol, price);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, stopping watch");
                    break;
                }
            }
        }

        Ok(())
    }
}
