//! Bybit v5 REST gateway
//!
//! Covers the four endpoints the order flow needs: instruments-info and
//! tickers (public), order create and position trading-stop (signed).

use super::{
    ExchangeGateway, GatewayError, PlaceOrderRequest, PlacedOrder, StopKind, TradingStopRequest,
};
use crate::instrument::InstrumentConstraints;
use crate::order::{OrderCategory, OrderType};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Bybit testnet base URL
pub const BYBIT_TESTNET_URL: &str = "https://api-testnet.bybit.com";

/// Configuration for the Bybit gateway
#[derive(Debug, Clone)]
pub struct BybitConfig {
    /// REST base URL
    pub base_url: String,
    /// API key for signed endpoints
    pub api_key: String,
    /// API secret for signed endpoints
    pub api_secret: String,
    /// Signature validity window in milliseconds
    pub recv_window_ms: u64,
    /// Request timeout
    pub timeout: Duration,
}

impl From<&crate::config::ExchangeConfig> for BybitConfig {
    fn from(config: &crate::config::ExchangeConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            recv_window_ms: config.recv_window_ms,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl Default for BybitConfig {
    fn default() -> Self {
        Self {
            base_url: BYBIT_TESTNET_URL.to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            recv_window_ms: 5000,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for Bybit's v5 REST API
pub struct BybitGateway {
    config: BybitConfig,
    client: Client,
}

impl BybitGateway {
    /// Create a gateway with default (testnet, unauthenticated) configuration
    pub fn new() -> Self {
        Self::with_config(BybitConfig::default())
    }

    /// Create a gateway with custom configuration
    pub fn with_config(config: BybitConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn sign_payload(&self, timestamp: u64, body: &str) -> String {
        let payload = format!(
            "{}{}{}{}",
            timestamp, self.config.api_key, self.config.recv_window_ms, body
        );
        let mut mac = Hmac::<Sha256>::new_from_slice(self.config.api_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(url = %url, "Bybit GET");

        let response = self.client.get(&url).query(query).send().await?;
        Self::decode(response).await
    }

    async fn post_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.config.base_url, path);
        let body_json = serde_json::to_string(body)?;
        let timestamp = timestamp_ms();
        let sign = self.sign_payload(timestamp, &body_json);
        tracing::debug!(url = %url, "Bybit POST");

        let response = self
            .client
            .post(&url)
            .header("X-BAPI-API-KEY", &self.config.api_key)
            .header("X-BAPI-TIMESTAMP", timestamp.to_string())
            .header("X-BAPI-RECV-WINDOW", self.config.recv_window_ms.to_string())
            .header("X-BAPI-SIGN", sign)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_json)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let response = response.error_for_status()?;
        let envelope: BybitResponse<T> = response.json().await?;
        if envelope.ret_code != 0 {
            return Err(GatewayError::Api {
                code: envelope.ret_code,
                message: envelope.ret_msg,
            });
        }
        envelope
            .result
            .ok_or_else(|| GatewayError::MalformedResponse("missing result".to_string()))
    }
}

impl Default for BybitGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeGateway for BybitGateway {
    async fn instrument_constraints(
        &self,
        category: OrderCategory,
        symbol: &str,
    ) -> Result<InstrumentConstraints, GatewayError> {
        let result: InstrumentList = self
            .get_public(
                "/v5/market/instruments-info",
                &[("category", category.as_str()), ("symbol", symbol)],
            )
            .await?;

        let entry = result
            .list
            .into_iter()
            .find(|e| e.symbol == symbol)
            .ok_or_else(|| GatewayError::SymbolNotFound(symbol.to_string()))?;

        Ok(InstrumentConstraints {
            tick_size: entry.price_filter.tick_size,
            min_price: entry.price_filter.min_price,
            max_price: entry.price_filter.max_price,
            qty_step: entry.lot_size_filter.qty_step,
            min_order_qty: entry.lot_size_filter.min_order_qty,
            max_order_qty: entry.lot_size_filter.max_order_qty,
        })
    }

    async fn last_price(
        &self,
        category: OrderCategory,
        symbol: &str,
    ) -> Result<Decimal, GatewayError> {
        let result: TickerList = self
            .get_public(
                "/v5/market/tickers",
                &[("category", category.as_str()), ("symbol", symbol)],
            )
            .await?;

        result
            .list
            .into_iter()
            .find(|t| t.symbol == symbol)
            .map(|t| t.last_price)
            .ok_or_else(|| GatewayError::SymbolNotFound(symbol.to_string()))
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<PlacedOrder, GatewayError> {
        let body = CreateOrderBody {
            category: request.category.as_str(),
            symbol: &request.symbol,
            side: request.side.as_str(),
            order_type: request.order_type.as_str(),
            qty: request.qty.to_string(),
            // Market orders execute at the book, the exchange rejects a price
            price: match request.order_type {
                OrderType::Limit => Some(request.price.to_string()),
                OrderType::Market => None,
            },
            order_link_id: &request.client_order_id,
            take_profit: request.take_profit.map(|p| p.to_string()),
            stop_loss: request.stop_loss.map(|p| p.to_string()),
        };

        let created: OrderCreated = self.post_signed("/v5/order/create", &body).await?;
        tracing::info!(
            external_id = %created.order_id,
            symbol = %request.symbol,
            side = request.side.as_str(),
            "order placed"
        );
        Ok(PlacedOrder {
            external_id: created.order_id,
        })
    }

    async fn set_trading_stop(&self, request: &TradingStopRequest) -> Result<(), GatewayError> {
        let body = match request.kind {
            StopKind::TakeProfit => TradingStopBody {
                category: request.category.as_str(),
                symbol: &request.symbol,
                tpsl_mode: "Partial",
                position_idx: 0,
                take_profit: Some(request.price.to_string()),
                tp_order_type: Some("Market"),
                tp_size: Some(request.qty.to_string()),
                tp_trigger_by: Some("MarkPrice"),
                stop_loss: None,
                sl_order_type: None,
                sl_size: None,
                sl_trigger_by: None,
            },
            StopKind::StopLoss => TradingStopBody {
                category: request.category.as_str(),
                symbol: &request.symbol,
                tpsl_mode: "Partial",
                position_idx: 0,
                take_profit: None,
                tp_order_type: None,
                tp_size: None,
                tp_trigger_by: None,
                stop_loss: Some(request.price.to_string()),
                sl_order_type: Some("Market"),
                sl_size: Some(request.qty.to_string()),
                sl_trigger_by: Some("MarkPrice"),
            },
        };

        let _: serde_json::Value = self.post_signed("/v5/position/trading-stop", &body).await?;
        tracing::info!(
            symbol = %request.symbol,
            kind = ?request.kind,
            price = %request.price,
            "trading stop set"
        );
        Ok(())
    }
}

fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Bybit v5 response envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BybitResponse<T> {
    ret_code: i64,
    ret_msg: String,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InstrumentList {
    list: Vec<InstrumentEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentEntry {
    symbol: String,
    price_filter: PriceFilter,
    lot_size_filter: LotSizeFilter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceFilter {
    tick_size: Decimal,
    min_price: Decimal,
    max_price: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LotSizeFilter {
    qty_step: Decimal,
    min_order_qty: Decimal,
    max_order_qty: Decimal,
}

#[derive(Debug, Deserialize)]
struct TickerList {
    list: Vec<TickerEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TickerEntry {
    symbol: String,
    last_price: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderCreated {
    order_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderBody<'a> {
    category: &'a str,
    symbol: &'a str,
    side: &'a str,
    order_type: &'a str,
    qty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<String>,
    order_link_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    take_profit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_loss: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TradingStopBody<'a> {
    category: &'a str,
    symbol: &'a str,
    tpsl_mode: &'a str,
    position_idx: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    take_profit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tp_order_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tp_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tp_trigger_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_loss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sl_order_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sl_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sl_trigger_by: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_payload_deterministic() {
        let gateway = BybitGateway::with_config(BybitConfig {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            ..BybitConfig::default()
        });

        let a = gateway.sign_payload(1700000000000, r#"{"symbol":"SOLUSDT"}"#);
        let b = gateway.sign_payload(1700000000000, r#"{"symbol":"SOLUSDT"}"#);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

        let c = gateway.sign_payload(1700000000001, r#"{"symbol":"SOLUSDT"}"#);
        assert_ne!(a, c);
    }

    #[test]
    fn test_create_order_body_wire_shape() {
        let body = CreateOrderBody {
            category: "linear",
            symbol: "SOLUSDT",
            side: "Buy",
            order_type: "Limit",
            qty: "10".to_string(),
            price: Some("19.180".to_string()),
            order_link_id: "client-1",
            take_profit: Some("19.854".to_string()),
            stop_loss: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["orderType"], "Limit");
        assert_eq!(json["orderLinkId"], "client-1");
        assert_eq!(json["qty"], "10");
        assert_eq!(json["takeProfit"], "19.854");
        assert!(json.get("stopLoss").is_none());
    }

    #[test]
    fn test_envelope_error_code() {
        let raw = r#"{"retCode":10001,"retMsg":"params error","result":null}"#;
        let envelope: BybitResponse<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.ret_code, 10001);
        assert_eq!(envelope.ret_msg, "params error");
    }

    #[test]
    fn test_instrument_entry_deserialize() {
        let raw = r#"{
            "symbol": "SOLUSDT",
            "priceFilter": {"minPrice": "0.010", "maxPrice": "19999.980", "tickSize": "0.010"},
            "lotSizeFilter": {"maxOrderQty": "79770.0", "minOrderQty": "0.1", "qtyStep": "0.1"}
        }"#;
        let entry: InstrumentEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.symbol, "SOLUSDT");
        assert_eq!(entry.price_filter.tick_size.to_string(), "0.010");
        assert_eq!(entry.lot_size_filter.qty_step.to_string(), "0.1");
    }
}
