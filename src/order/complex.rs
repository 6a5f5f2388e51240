//! Aggregation of simple orders

use crate::order::{OrderError, OrderSide, SimpleOrder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A batch of simple orders treated as one position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexOrder {
    /// Batch identifier
    pub id: Uuid,
    /// Member orders
    pub orders: Vec<SimpleOrder>,
    /// Shared side of the members, derived by `calculate()`
    pub side: Option<OrderSide>,
    /// Total quantity
    pub qty: Decimal,
    /// Total value at the open prices
    pub value: Decimal,
    /// Total worst-case loss
    pub loss: Decimal,
    /// Total best-case profit
    pub profit: Decimal,
    /// Total profit over total loss
    pub risk_profit_rate: Decimal,
}

impl ComplexOrder {
    /// Create an empty batch
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            orders: vec![],
            side: None,
            qty: Decimal::ZERO,
            value: Decimal::ZERO,
            loss: Decimal::ZERO,
            profit: Decimal::ZERO,
            risk_profit_rate: Decimal::ZERO,
        }
    }

    /// Append a member order; call `calculate()` to refresh the aggregates
    pub fn push(&mut self, order: SimpleOrder) {
        self.orders.push(order);
    }

    /// Recompute the aggregates over the member orders.
    ///
    /// Fails on an empty batch and when members disagree on side.
    pub fn calculate(&mut self) -> Result<(), OrderError> {
        let first = self.orders.first().ok_or(OrderError::NoOrders)?;
        let side = first.side;
        if self.orders.iter().any(|order| order.side != side) {
            return Err(OrderError::MixedSides);
        }

        self.side = Some(side);
        self.qty = self.orders.iter().map(|order| order.qty()).sum();
        self.value = self.orders.iter().map(|order| order.value()).sum();
        self.loss = self.orders.iter().map(|order| order.max_loss()).sum();
        self.profit = self.orders.iter().map(|order| order.max_profit()).sum();
        self.risk_profit_rate = if self.loss.is_zero() {
            Decimal::ZERO
        } else {
            self.profit / self.loss
        };
        Ok(())
    }
}

impl Default for ComplexOrder {
    fn default() -> Self {
        Self::new()
    }
}
