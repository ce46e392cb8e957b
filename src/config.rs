//! Configuration types for quote-tracker

use crate::quote::{QuoteClientConfig, DEFAULT_REQUEST_LIMIT, TWELVE_DATA_API_URL};
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "TWELVE_DATA_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Quote provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; `TWELVE_DATA_API_KEY` takes precedence when set
    #[serde(default)]
    pub api_key: Option<String>,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Requests admitted per window
    #[serde(default = "default_request_limit")]
    pub request_limit: u32,

    /// Rate window length (seconds)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_base_url() -> String {
    TWELVE_DATA_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_request_limit() -> u32 {
    DEFAULT_REQUEST_LIMIT
}
fn default_window_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            request_limit: default_request_limit(),
            window_secs: default_window_secs(),
        }
    }
}

impl ProviderConfig {
    /// Build the client configuration, reading the API key from the environment
    pub fn client_config(&self) -> QuoteClientConfig {
        self.client_config_with_env(std::env::var(API_KEY_ENV).ok())
    }

    /// Build the client configuration with an explicit environment value
    pub fn client_config_with_env(&self, env_key: Option<String>) -> QuoteClientConfig {
        let api_key = env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone());

        QuoteClientConfig {
            api_key,
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            request_limit: self.request_limit,
            window: Duration::from_secs(self.window_secs),
        }
    }
}

/// Background price polling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Seconds between polling ticks
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,

    /// Symbols polled by `watch` when none are given on the command line
    #[serde(default)]
    pub symbols: Vec<String>,
}

fn default_poll_interval_secs() -> u64 {
    15
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
            symbols: vec![],
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; exporter disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
