//! Derived position values

use super::Holding;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Market value and performance of a holding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Valuation {
    /// Price used for the valuation
    pub price: Decimal,
    /// price × quantity
    pub current_value: Decimal,
    /// purchase price × quantity
    pub cost_basis: Decimal,
    /// Change against cost basis, percent
    pub total_change_pct: Decimal,
    /// Change against the previous day's price, percent
    pub daily_change_pct: Decimal,
    /// Change against the year's first price, percent
    pub ytd_change_pct: Decimal,
}

impl Valuation {
    /// Value a holding at its last known price (purchase price if never quoted)
    ///
    /// Returns `None` when a product or percentage overflows `Decimal`.
    pub fn of(holding: &Holding) -> Option<Self> {
        let price = holding.current_price.unwrap_or(holding.price_at_purchase);
        let current_value = price.checked_mul(holding.quantity)?;
        let cost_basis = holding.price_at_purchase.checked_mul(holding.quantity)?;

        Some(Self {
            price,
            current_value,
            cost_basis,
            total_change_pct: pct_change(cost_basis, current_value)?,
            daily_change_pct: reference_change(holding.previous_day_price, price)?,
            ytd_change_pct: reference_change(holding.year_start_price, price)?,
        })
    }
}

fn reference_change(reference: Option<Decimal>, price: Decimal) -> Option<Decimal> {
    match reference {
        Some(p) => pct_change(p, price),
        None => Some(Decimal::ZERO),
    }
}

/// Percent change from `from` to `to`, 2 dp; zero when `from` is zero,
/// `None` on overflow
pub fn pct_change(from: Decimal, to: Decimal) -> Option<Decimal> {
    if from.is_zero() {
        return Some(Decimal::ZERO);
    }
    let ratio = to.checked_sub(from)?.checked_div(from)?;
    Some(ratio.checked_mul(dec!(100))?.round_dp(2))
}
