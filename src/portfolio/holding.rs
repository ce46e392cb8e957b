//! Stock and crypto holdings

use crate::quote::{crypto_pair, normalize_symbol};
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Asset class of a holding; decides how its quote symbol is formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Listed equity, quoted by ticker
    Stock,
    /// Crypto asset, quoted against USD
    Crypto,
}

/// A position in one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    /// Display name
    pub name: String,
    /// Symbol as entered (e.g. "NASDAQ:aapl", "btc")
    pub symbol: String,
    /// Asset class
    pub kind: AssetKind,
    /// Units held
    pub quantity: Decimal,
    /// Purchase price per unit
    pub price_at_purchase: Decimal,
    /// Last known market price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    /// Price carried over from the previous day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_day_price: Option<Decimal>,
    /// First price seen this year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_start_price: Option<Decimal>,
    /// When `current_price` was last set from a quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_price_update: Option<DateTime<Utc>>,
}

impl Holding {
    /// Create a holding with no market data yet
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        kind: AssetKind,
        quantity: Decimal,
        price_at_purchase: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind,
            quantity,
            price_at_purchase,
            current_price: None,
            previous_day_price: None,
            year_start_price: None,
            last_price_update: None,
        }
    }

    /// Symbol sent to the quote provider
    pub fn quote_symbol(&self) -> String {
        match self.kind {
            AssetKind::Stock => normalize_symbol(&self.symbol),
            AssetKind::Crypto => crypto_pair(&self.symbol),
        }
    }

    /// Record a fresh market price, rolling the day and year reference prices
    pub fn apply_price(&mut self, price: Decimal, now: DateTime<Utc>) {
        let last = self.last_price_update;

        let new_day = last.map_or(true, |l| l.date_naive() != now.date_naive());
        if new_day {
            self.previous_day_price = Some(self.current_price.unwrap_or(price));
        }

        let new_year = last.map_or(true, |l| l.year() != now.year());
        if self.year_start_price.is_none() || new_year {
            self.year_start_price = Some(price);
        }

        self.current_price = Some(price);
        self.last_price_update = Some(now);
    }

    /// Seed market data from the purchase price when no quote is available
    pub fn seed_from_purchase(&mut self) {
        self.current_price = Some(self.price_at_purchase);
    }
}
