//! Configuration types for call-trader

use crate::order::{OrderCategory, OrderType};
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub trading: TradingConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Exchange endpoint and credentials
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub api_secret: String,

    /// Signature validity window in milliseconds
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Order building defaults
#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
    #[serde(default = "default_category")]
    pub category: OrderCategory,

    #[serde(default = "default_order_type")]
    pub order_type: OrderType,

    /// Total quantity split across a prediction's fan-out
    #[serde(default = "default_total_qty")]
    pub total_qty: Decimal,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_base_url() -> String {
    crate::gateway::BYBIT_TESTNET_URL.to_string()
}
fn default_recv_window_ms() -> u64 {
    5000
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_category() -> OrderCategory {
    OrderCategory::Linear
}
fn default_order_type() -> OrderType {
    OrderType::Limit
}
fn default_total_qty() -> Decimal {
    dec!(1)
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            api_secret: String::new(),
            recv_window_ms: default_recv_window_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            order_type: default_order_type(),
            total_qty: default_total_qty(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [exchange]
            base_url = "https://api-testnet.bybit.com"
            api_key = "key"
            api_secret = "secret"

            [trading]
            category = "linear"
            order_type = "Limit"
            total_qty = "2.5"

            [telemetry]
            log_level = "debug"
            log_format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.exchange.api_key, "key");
        assert_eq!(config.trading.category, OrderCategory::Linear);
        assert_eq!(config.trading.total_qty, dec!(2.5));
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.exchange.base_url, crate::gateway::BYBIT_TESTNET_URL);
        assert_eq!(config.exchange.recv_window_ms, 5000);
        assert_eq!(config.trading.order_type, OrderType::Limit);
        assert_eq!(config.trading.total_qty, dec!(1));
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    }
}
