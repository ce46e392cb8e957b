//! Prometheus metrics

use metrics::{counter, gauge};

/// Outcome of a quote request, used as a metric label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Price(s) returned
    Success,
    /// Rejected locally or by the provider for quota
    RateLimited,
    /// Transport failure or provider error payload
    ProviderError,
    /// Body could not be mapped to prices
    InvalidResponse,
}

impl RequestOutcome {
    /// Label value
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Success => "success",
            RequestOutcome::RateLimited => "rate_limited",
            RequestOutcome::ProviderError => "provider_error",
            RequestOutcome::InvalidResponse => "invalid_response",
        }
    }
}

/// Count a finished quote request
pub fn record_request(outcome: RequestOutcome) {
    counter!("quote_requests_total", "outcome" => outcome.as_str()).increment(1);
    if outcome == RequestOutcome::RateLimited {
        counter!("quote_rate_limited_total").increment(1);
    }
}

/// Publish the quota left in the current window
pub fn set_window_remaining(remaining: u32) {
    gauge!("quote_window_remaining").set(f64::from(remaining));
}

/// Publish how many holdings took a fresh price in the last refresh
pub fn set_holdings_updated(updated: usize) {
    gauge!("portfolio_holdings_updated").set(updated as f64);
}
