//! Tick-grid rounding

use rust_decimal::{Decimal, RoundingStrategy};

/// Round `val` to the nearest multiple of `tick`, ties away from zero.
///
/// The result carries the tick's own scale, so a tick of `0.01` never yields
/// digits beyond two decimal places. A zero tick passes `val` through
/// unchanged.
pub fn round_tick(val: Decimal, tick: Decimal) -> Decimal {
    if tick.is_zero() {
        return val;
    }
    let ticks = (val / tick).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    ticks * tick
}

/// Round `val` to the tick grid, then clamp into `[min, max]`.
pub fn fit_to_chunk(val: Decimal, tick: Decimal, min: Decimal, max: Decimal) -> Decimal {
    round_tick(val, tick).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_tick_nearest() {
        assert_eq!(round_tick(dec!(19.183), dec!(0.01)), dec!(19.18));
        assert_eq!(round_tick(dec!(19.187), dec!(0.01)), dec!(19.19));
    }

    #[test]
    fn test_round_tick_half_up() {
        // Ties round away from zero, not to even
        assert_eq!(round_tick(dec!(0.015), dec!(0.01)), dec!(0.02));
        assert_eq!(round_tick(dec!(0.025), dec!(0.01)), dec!(0.03));
    }

    #[test]
    fn test_round_tick_keeps_tick_scale() {
        let res = round_tick(dec!(10), dec!(0.01));
        assert_eq!(res, dec!(10.00));
        assert_eq!(res.scale(), 2);
    }

    #[test]
    fn test_round_tick_zero_tick_passthrough() {
        assert_eq!(round_tick(dec!(19.183), dec!(0)), dec!(19.183));
    }

    #[test]
    fn test_round_tick_coarse_grid() {
        assert_eq!(round_tick(dec!(17), dec!(5)), dec!(15));
        assert_eq!(round_tick(dec!(18), dec!(5)), dec!(20));
    }

    #[test]
    fn test_fit_to_chunk_clamps() {
        assert_eq!(fit_to_chunk(dec!(0.001), dec!(0.01), dec!(0.01), dec!(100)), dec!(0.01));
        assert_eq!(fit_to_chunk(dec!(250), dec!(0.01), dec!(0.01), dec!(100)), dec!(100));
    }

    #[test]
    fn test_fit_to_chunk_idempotent() {
        let once = fit_to_chunk(dec!(19.1837), dec!(0.005), dec!(0.005), dec!(1000));
        let twice = fit_to_chunk(once, dec!(0.005), dec!(0.005), dec!(1000));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fit_to_chunk_on_grid() {
        let res = fit_to_chunk(dec!(6.342), dec!(0.001), dec!(0.001), dec!(1000));
        assert_eq!(res, dec!(6.342));
        // Result is an exact multiple of the tick
        assert_eq!(res % dec!(0.001), dec!(0.000));
    }
}
