//! Integration tests

mod common;
mod config_test;
mod portfolio_test;
mod quote_client_test;
