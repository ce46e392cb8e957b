//! quote-tracker: rate-limited market prices for a personal portfolio
//!
//! This library provides:
//! - A Twelve Data price client guarded by a fixed-window request limiter
//! - Single-symbol and batch price lookups
//! - Stock and crypto holding valuation with stale-price fallback
//! - Background price polling
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod poller;
pub mod portfolio;
pub mod quote;
pub mod telemetry;
