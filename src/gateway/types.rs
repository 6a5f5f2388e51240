//! Gateway request and response payloads

use crate::order::{OrderCategory, OrderSide, OrderType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order placement request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Product category
    pub category: OrderCategory,
    /// Instrument symbol
    pub symbol: String,
    /// Trade side
    pub side: OrderSide,
    /// Execution type
    pub order_type: OrderType,
    /// Order quantity
    pub qty: Decimal,
    /// Order price (for limit orders)
    pub price: Decimal,
    /// Caller-chosen id echoed back by the exchange
    pub client_order_id: String,
    /// Best take-profit level to ride on the order itself
    pub take_profit: Option<Decimal>,
    /// Best stop-loss level to ride on the order itself
    pub stop_loss: Option<Decimal>,
}

/// A successfully placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    /// Exchange-assigned order id
    pub external_id: String,
}

/// Which protective level a trading stop sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopKind {
    StopLoss,
    TakeProfit,
}

/// A partial trading-stop request for one ladder level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingStopRequest {
    /// Product category
    pub category: OrderCategory,
    /// Instrument symbol
    pub symbol: String,
    /// Stop-loss or take-profit
    pub kind: StopKind,
    /// Trigger price
    pub price: Decimal,
    /// Quantity closed when the level triggers
    pub qty: Decimal,
}
