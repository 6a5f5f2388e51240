//! Instrument constraints
//!
//! Per-symbol price/quantity granularity and bounds used to fit raw
//! positions to what the exchange will accept.

mod fit;

pub use fit::{fit_to_chunk, round_tick};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange-imposed granularity and bounds for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentConstraints {
    /// Minimum price increment
    pub tick_size: Decimal,
    /// Lowest accepted price
    pub min_price: Decimal,
    /// Highest accepted price
    pub max_price: Decimal,
    /// Minimum quantity increment
    pub qty_step: Decimal,
    /// Smallest accepted order quantity
    pub min_order_qty: Decimal,
    /// Largest accepted order quantity
    pub max_order_qty: Decimal,
}

impl InstrumentConstraints {
    /// Fit a raw price onto the price grid and bounds
    pub fn fit_price(&self, price: Decimal) -> Decimal {
        fit_to_chunk(price, self.tick_size, self.min_price, self.max_price)
    }

    /// Fit a raw quantity onto the lot grid and bounds
    pub fn fit_qty(&self, qty: Decimal) -> Decimal {
        fit_to_chunk(qty, self.qty_step, self.min_order_qty, self.max_order_qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn linkusdt() -> InstrumentConstraints {
        InstrumentConstraints {
            tick_size: dec!(0.001),
            min_price: dec!(0.001),
            max_price: dec!(1999.998),
            qty_step: dec!(0.1),
            min_order_qty: dec!(0.1),
            max_order_qty: dec!(52770),
        }
    }

    #[test]
    fn test_fit_price() {
        let c = linkusdt();
        assert_eq!(c.fit_price(dec!(6.3424)), dec!(6.342));
        assert_eq!(c.fit_price(dec!(0.0001)), dec!(0.001));
    }

    #[test]
    fn test_fit_qty() {
        let c = linkusdt();
        assert_eq!(c.fit_qty(dec!(3.14)), dec!(3.1));
        assert_eq!(c.fit_qty(dec!(100000)), dec!(52770));
    }
}
