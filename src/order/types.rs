//! Order enums and errors

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    /// Long / buy
    Buy,
    /// Short / sell
    Sell,
}

impl OrderSide {
    /// Wire representation expected by the exchange
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
        }
    }
}

/// Product category of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderCategory {
    Spot,
    Linear,
    Inverse,
    Option,
}

impl OrderCategory {
    /// Wire representation expected by the exchange
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderCategory::Spot => "spot",
            OrderCategory::Linear => "linear",
            OrderCategory::Inverse => "inverse",
            OrderCategory::Option => "option",
        }
    }
}

/// Order execution type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Market order (immediate execution)
    Market,
    /// Limit order (price specified)
    Limit,
}

impl OrderType {
    /// Wire representation expected by the exchange
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "Market",
            OrderType::Limit => "Limit",
        }
    }
}

/// Order construction and aggregation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Quantity must be strictly positive
    #[error("invalid quantity: {0}")]
    InvalidQuantity(Decimal),
    /// Open price must be strictly positive
    #[error("invalid open price: {0}")]
    InvalidOpenPrice(Decimal),
    /// Stop loss on the wrong side of the open price
    #[error("invalid stop loss {stop_loss} for open price {open_price}")]
    InvalidStopLoss {
        stop_loss: Decimal,
        open_price: Decimal,
    },
    /// Take profit on the wrong side of the open price
    #[error("invalid take profit {take_profit} for open price {open_price}")]
    InvalidTakeProfit {
        take_profit: Decimal,
        open_price: Decimal,
    },
    /// Complex order has no member orders
    #[error("complex order has no member orders")]
    NoOrders,
    /// Member orders disagree on side
    #[error("complex order members have mixed sides")]
    MixedSides,
}
