//! Prediction types

use crate::order::{ComplexOrder, OrderCategory, OrderError, OrderSide, OrderType, SimpleOrder};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Trade-call parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No buy/sell keyword found anywhere in the text
    #[error("no side keyword in prediction text")]
    MissingSide,
    /// No open-price line found
    #[error("no open price line in prediction text")]
    MissingOpen,
    /// No stop-loss line found
    #[error("no stop loss line in prediction text")]
    MissingStopLoss,
    /// No take-profit line found
    #[error("no take profit line in prediction text")]
    MissingTakeProfit,
}

/// A structured trade call extracted from adviser text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviserPrediction {
    /// Prediction identifier
    pub id: Uuid,
    /// Parse timestamp
    pub timestamp: DateTime<Utc>,
    /// Adviser the call came from
    pub adviser: String,
    /// Trade side
    pub side: OrderSide,
    /// Entry prices, ascending
    pub opens: Vec<Decimal>,
    /// Stop-loss prices, ascending
    pub stop_losses: Vec<Decimal>,
    /// Take-profit prices, ascending
    pub take_profits: Vec<Decimal>,
}

impl AdviserPrediction {
    /// Fan the prediction out into one order per (entry, target) pair.
    ///
    /// `total_qty` is split evenly across the pairs; every order carries the
    /// protective stop (lowest for Buy, highest for Sell).
    pub fn complex_order(
        &self,
        category: OrderCategory,
        symbol: &str,
        order_type: OrderType,
        total_qty: Decimal,
    ) -> Result<ComplexOrder, OrderError> {
        let pairs = self.opens.len() * self.take_profits.len();
        let qty = if pairs > 0 {
            total_qty / Decimal::from(pairs as u64)
        } else {
            Decimal::ZERO
        };
        let stop_loss = match self.side {
            OrderSide::Buy => self.stop_losses.iter().copied().min(),
            OrderSide::Sell => self.stop_losses.iter().copied().max(),
        }
        .unwrap_or(Decimal::ZERO);

        let mut complex = ComplexOrder::new();
        for &open in &self.opens {
            for &take_profit in &self.take_profits {
                let order = SimpleOrder::from_levels(
                    category,
                    symbol,
                    self.side,
                    order_type,
                    qty,
                    open,
                    stop_loss,
                    take_profit,
                )?;
                complex.push(order);
            }
        }
        complex.calculate()?;
        Ok(complex)
    }

    /// Quantity that caps the worst-case loss at `max_loss`.
    ///
    /// Sizes off the widest entry/stop distance; `0` when no distance exists.
    pub fn qty_for_max_loss(&self, max_loss: Decimal) -> Decimal {
        let widest = self
            .opens
            .iter()
            .flat_map(|open| {
                self.stop_losses
                    .iter()
                    .map(move |stop_loss| (*open - *stop_loss).abs())
            })
            .max()
            .unwrap_or(Decimal::ZERO);
        if widest.is_zero() {
            Decimal::ZERO
        } else {
            max_loss / widest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prediction(side: OrderSide) -> AdviserPrediction {
        AdviserPrediction {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            adviser: "test".to_string(),
            side,
            opens: vec![dec!(19.180)],
            stop_losses: vec![dec!(18.609)],
            take_profits: vec![dec!(19.422), dec!(19.854)],
        }
    }

    #[test]
    fn test_complex_order_fan_out() {
        let prediction = prediction(OrderSide::Buy);
        let complex = prediction
            .complex_order(OrderCategory::Linear, "SOLUSDT", OrderType::Limit, dec!(10))
            .unwrap();

        // one order per (entry, target) pair, qty split evenly
        assert_eq!(complex.orders.len(), 2);
        assert_eq!(complex.qty, dec!(10));
        for order in &complex.orders {
            assert_eq!(order.qty(), dec!(5));
            assert_eq!(order.stop_losses[0].price(), dec!(18.609));
        }
        assert!(complex.risk_profit_rate > dec!(0));
    }

    #[test]
    fn test_complex_order_sell_uses_highest_stop() {
        let mut prediction = prediction(OrderSide::Sell);
        prediction.opens = vec![dec!(20)];
        prediction.stop_losses = vec![dec!(21), dec!(22)];
        prediction.take_profits = vec![dec!(18)];

        let complex = prediction
            .complex_order(OrderCategory::Linear, "SOLUSDT", OrderType::Limit, dec!(4))
            .unwrap();
        assert_eq!(complex.orders[0].stop_losses[0].price(), dec!(22));
    }

    #[test]
    fn test_qty_for_max_loss() {
        let mut prediction = prediction(OrderSide::Buy);
        prediction.opens = vec![dec!(20)];
        prediction.stop_losses = vec![dec!(16)];
        // widest distance 4, so a 100 loss cap buys 25
        assert_eq!(prediction.qty_for_max_loss(dec!(100)), dec!(25));
    }

    #[test]
    fn test_qty_for_max_loss_no_distance() {
        let mut prediction = prediction(OrderSide::Buy);
        prediction.stop_losses = vec![dec!(19.180)];
        assert_eq!(prediction.qty_for_max_loss(dec!(100)), dec!(0));
    }
}
