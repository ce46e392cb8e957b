//! Portfolio module
//!
//! Holdings valued from quote prices. A failed or rate-limited refresh leaves
//! holdings at their last known price.

mod holding;
mod valuation;

pub use holding::{AssetKind, Holding};
pub use valuation::{pct_change, Valuation};

use crate::quote::{dedup_symbols, QuoteError, QuotePriceClient};
use crate::telemetry::set_holdings_updated;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a price refresh
#[derive(Debug)]
pub struct RefreshOutcome {
    /// Distinct quote symbols requested
    pub requested: usize,
    /// Holdings that took a fresh price
    pub updated: usize,
    /// Holdings left at their previous price
    pub stale: usize,
    /// Why the batch failed, if it did
    pub error: Option<QuoteError>,
}

/// A collection of holdings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    /// Load holdings from a TOML file of `[[holdings]]` tables
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let portfolio: Portfolio = toml::from_str(&content)?;
        Ok(portfolio)
    }

    /// Write holdings back, keeping last known prices for the next run
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Distinct provider symbols for all holdings
    pub fn quote_symbols(&self) -> Vec<String> {
        dedup_symbols(self.holdings.iter().map(Holding::quote_symbol))
    }

    /// Refresh prices with one batch request
    pub async fn refresh(&mut self, client: &QuotePriceClient) -> RefreshOutcome {
        self.refresh_at(client, Utc::now()).await
    }

    /// Refresh prices, stamping updates with `now`
    pub async fn refresh_at(
        &mut self,
        client: &QuotePriceClient,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        let symbols = self.quote_symbols();
        let requested = symbols.len();

        let prices = match client.get_prices(&symbols).await {
            Ok(prices) => prices,
            Err(e) => {
                if e.is_rate_limited() {
                    tracing::warn!(error = %e, "Rate limited, keeping last known prices");
                } else {
                    tracing::error!(error = %e, "Price refresh failed, keeping last known prices");
                }
                return RefreshOutcome {
                    requested,
                    updated: 0,
                    stale: self.holdings.len(),
                    error: Some(e),
                };
            }
        };

        let mut updated = 0;
        for holding in &mut self.holdings {
            match prices.get(&holding.quote_symbol()) {
                Some(&price) => {
                    holding.apply_price(price, now);
                    updated += 1;
                }
                None => {
                    tracing::debug!(
                        symbol = %holding.symbol,
                        current_price = ?holding.current_price,
                        "No fresh price, keeping existing values"
                    );
                }
            }
        }

        set_holdings_updated(updated);
        tracing::info!(requested, updated, "Refreshed portfolio prices");

        RefreshOutcome {
            requested,
            updated,
            stale: self.holdings.len() - updated,
            error: None,
        }
    }

    /// Add a holding priced from a live quote
    ///
    /// When the quote fails the holding is seeded with its purchase price.
    /// Returns whether a live price was used.
    pub async fn add(&mut self, mut holding: Holding, client: &QuotePriceClient) -> bool {
        let symbol = holding.quote_symbol();
        let priced = match client.get_price(&symbol).await {
            Ok(price) => {
                holding.apply_price(price, Utc::now());
                true
            }
            Err(e) => {
                tracing::warn!(
                    symbol = %symbol,
                    error = %e,
                    "Could not get current price, using purchase price"
                );
                holding.seed_from_purchase();
                false
            }
        };

        self.holdings.push(holding);
        priced
    }

    /// Valuations in holding order
    ///
    /// Holdings whose value overflows `Decimal` are logged and left out.
    pub fn valuations(&self) -> Vec<(&Holding, Valuation)> {
        self.holdings
            .iter()
            .filter_map(|h| match Valuation::of(h) {
                Some(v) => Some((h, v)),
                None => {
                    tracing::warn!(
                        symbol = %h.symbol,
                        quantity = %h.quantity,
                        current_price = ?h.current_price,
                        "Valuation overflowed, skipping holding"
                    );
                    None
                }
            })
            .collect()
    }

    /// Sum of current values
    pub fn total_value(&self) -> Decimal {
        checked_total(self.valuations(), "current_value", |v| v.current_value)
    }

    /// Sum of cost bases
    pub fn total_cost(&self) -> Decimal {
        checked_total(self.valuations(), "cost_basis", |v| v.cost_basis)
    }

    /// Whole-portfolio change against cost, percent
    pub fn total_change_pct(&self) -> Decimal {
        pct_change(self.total_cost(), self.total_value()).unwrap_or_else(|| {
            tracing::warn!("Portfolio change overflowed, reporting zero");
            Decimal::ZERO
        })
    }
}

fn checked_total(
    valuations: Vec<(&Holding, Valuation)>,
    field: &'static str,
    amount: impl Fn(&Valuation) -> Decimal,
) -> Decimal {
    valuations
        .iter()
        .fold(Decimal::ZERO, |total, (holding, v)| {
            total.checked_add(amount(v)).unwrap_or_else(|| {
                tracing::warn!(symbol = %holding.symbol, field, "Total overflowed, skipping holding");
                total
            })
        })
}
