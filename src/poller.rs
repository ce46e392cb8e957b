//! Periodic batch price polling
//!
//! Polls a fixed symbol list on an interval and pushes each resolved batch to
//! a channel. Ticks that land while the limiter is exhausted are skipped.

use crate::quote::{LimiterState, QuotePriceClient};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Default polling interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// One batch of polled prices
#[derive(Debug, Clone)]
pub struct PriceUpdate {
    /// Resolved prices; unresolved symbols are absent
    pub prices: HashMap<String, Decimal>,
    /// When the batch was received
    pub fetched_at: DateTime<Utc>,
}

/// Background poller over a shared quote client
pub struct PricePoller {
    client: Arc<QuotePriceClient>,
    symbols: Vec<String>,
    interval: Duration,
    buffer_size: usize,
}

impl PricePoller {
    /// Create a poller for `symbols` with the default interval
    pub fn new(client: Arc<QuotePriceClient>, symbols: Vec<String>) -> Self {
        Self {
            client,
            symbols,
            interval: DEFAULT_POLL_INTERVAL,
            buffer_size: 16,
        }
    }

    /// Set the polling interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start polling; the first tick fires immediately
    ///
    /// The task ends when the returned receiver is dropped.
    pub fn spawn(self) -> mpsc::Receiver<PriceUpdate> {
        let (tx, rx) = mpsc::channel(self.buffer_size);

        if self.symbols.is_empty() {
            tracing::warn!("No symbols to poll, returning empty receiver");
            return rx;
        }

        tracing::info!(
            symbols = self.symbols.len(),
            interval_secs = self.interval.as_secs(),
            "Started price poller"
        );

        tokio::spawn(async move {
            self.run(tx).await;
            tracing::debug!("Price poller stopped");
        });

        rx
    }

    async fn run(self, tx: mpsc::Sender<PriceUpdate>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tx.closed() => break,
            }

            if self.client.limiter().state() == LimiterState::Exhausted {
                tracing::debug!("Quota exhausted, skipping poll tick");
                continue;
            }

            match self.client.get_prices(&self.symbols).await {
                Ok(prices) => {
                    let update = PriceUpdate {
                        prices,
                        fetched_at: Utc::now(),
                    };
                    if tx.send(update).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Poll failed, will retry next tick");
                }
            }
        }
    }
}
