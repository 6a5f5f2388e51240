//! Exchange gateway module
//!
//! Abstract boundary to the exchange: instrument metadata, tickers, order
//! placement, and trading stops. Prices and quantities cross this boundary
//! as decimal strings.

mod bybit;
mod paper;
mod types;

pub use bybit::{BybitConfig, BybitGateway, BYBIT_TESTNET_URL};
pub use paper::PaperGateway;
pub use types::{PlaceOrderRequest, PlacedOrder, StopKind, TradingStopRequest};

use crate::instrument::InstrumentConstraints;
use crate::order::OrderCategory;
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Exchange gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Request payload could not be encoded
    #[error("payload encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    /// Exchange rejected the request
    #[error("exchange error {code}: {message}")]
    Api { code: i64, message: String },
    /// Response did not contain the requested symbol
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),
    /// Response body did not match the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Trait for exchange gateway implementations
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Fetch price/quantity granularity and bounds for a symbol
    async fn instrument_constraints(
        &self,
        category: OrderCategory,
        symbol: &str,
    ) -> Result<InstrumentConstraints, GatewayError>;

    /// Fetch the last traded price for a symbol
    async fn last_price(
        &self,
        category: OrderCategory,
        symbol: &str,
    ) -> Result<Decimal, GatewayError>;

    /// Place an order
    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<PlacedOrder, GatewayError>;

    /// Set one partial stop-loss or take-profit level on a position
    async fn set_trading_stop(&self, request: &TradingStopRequest) -> Result<(), GatewayError>;
}
