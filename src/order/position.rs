//! Market position value type

use crate::instrument::InstrumentConstraints;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A quantity held at a price, with its derived monetary value.
///
/// Adding or subtracting two positions merges them: quantities sum, the
/// price becomes the value-weighted average, and the value is carried over
/// exactly from the operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPosition {
    qty: Decimal,
    price: Decimal,
    value: Decimal,
}

impl MarketPosition {
    /// Create a position; `value` is derived as `qty * price`
    pub fn new(qty: Decimal, price: Decimal) -> Self {
        Self {
            qty,
            price,
            value: qty * price,
        }
    }

    pub fn qty(&self) -> Decimal {
        self.qty
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Replace the quantity, recomputing `value`
    pub fn set_qty(&mut self, qty: Decimal) {
        self.qty = qty;
        self.value = self.qty * self.price;
    }

    /// Replace the price, recomputing `value`
    pub fn set_price(&mut self, price: Decimal) {
        self.price = price;
        self.value = self.qty * self.price;
    }

    /// Fit price then quantity onto the instrument's grid and bounds
    pub fn fit(&mut self, constraints: &InstrumentConstraints) {
        self.set_price(constraints.fit_price(self.price));
        self.set_qty(constraints.fit_qty(self.qty));
    }
}

impl Add for MarketPosition {
    type Output = MarketPosition;

    fn add(self, other: MarketPosition) -> MarketPosition {
        let qty = self.qty + other.qty;
        let value = self.value + other.value;
        let price = if qty.is_zero() {
            Decimal::ZERO
        } else {
            value / qty
        };
        let mut res = MarketPosition::new(qty, price);
        // The summed value is authoritative; the averaged price would not
        // reproduce it exactly once multiplied back.
        res.value = value;
        res
    }
}

impl Sub for MarketPosition {
    type Output = MarketPosition;

    fn sub(self, other: MarketPosition) -> MarketPosition {
        let qty = self.qty - other.qty;
        let value = self.value - other.value;
        let price = if qty.is_zero() {
            Decimal::ZERO
        } else {
            value / qty
        };
        let mut res = MarketPosition::new(qty, price);
        res.value = value;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_value_derived() {
        let pos = MarketPosition::new(dec!(10), dec!(19.180));
        assert_eq!(pos.value(), dec!(191.800));
    }

    #[test]
    fn test_setters_recompute_value() {
        let mut pos = MarketPosition::new(dec!(10), dec!(19.180));
        pos.set_price(dec!(19.422));
        assert_eq!(pos.value(), dec!(194.220));
        pos.set_qty(dec!(5));
        assert_eq!(pos.value(), dec!(97.110));
    }

    #[test]
    fn test_add_merges_weighted() {
        let a = MarketPosition::new(dec!(1), dec!(10));
        let b = MarketPosition::new(dec!(3), dec!(20));
        let merged = a + b;
        assert_eq!(merged.qty(), dec!(4));
        assert_eq!(merged.price(), dec!(17.5));
        assert_eq!(merged.value(), dec!(70));
    }

    #[test]
    fn test_add_preserves_summed_value() {
        // 100 / 3 has no finite decimal expansion; the summed value must
        // survive the merge untouched.
        let a = MarketPosition::new(dec!(1), dec!(33));
        let b = MarketPosition::new(dec!(2), dec!(33.5));
        let merged = a + b;
        assert_eq!(merged.qty(), dec!(3));
        assert_eq!(merged.value(), dec!(100));
    }

    #[test]
    fn test_add_zero_qty_zero_price() {
        let a = MarketPosition::new(dec!(2), dec!(10));
        let b = MarketPosition::new(dec!(-2), dec!(15));
        let merged = a + b;
        assert_eq!(merged.qty(), dec!(0));
        assert_eq!(merged.price(), dec!(0));
        assert_eq!(merged.value(), dec!(-10));
    }

    #[test]
    fn test_sub() {
        let open = MarketPosition::new(dec!(10), dec!(10));
        let stop = MarketPosition::new(dec!(10), dec!(2));
        let loss = open - stop;
        assert_eq!(loss.qty(), dec!(0));
        assert_eq!(loss.value(), dec!(80));
    }

    #[test]
    fn test_fit_price_then_qty() {
        let constraints = InstrumentConstraints {
            tick_size: dec!(0.001),
            min_price: dec!(0.001),
            max_price: dec!(1999.998),
            qty_step: dec!(0.1),
            min_order_qty: dec!(0.1),
            max_order_qty: dec!(52770),
        };
        let mut pos = MarketPosition::new(dec!(3.14), dec!(6.3426));
        pos.fit(&constraints);
        assert_eq!(pos.price(), dec!(6.343));
        assert_eq!(pos.qty(), dec!(3.1));
        assert_eq!(pos.value(), pos.qty() * pos.price());

        // Fitting is idempotent
        let fitted = pos;
        pos.fit(&constraints);
        assert_eq!(pos, fitted);
    }
}
