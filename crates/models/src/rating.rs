//! Ship rating formula.
//!
//! `rating = (80 * speed * k) / (3019 - prod_year + 1)` with `k = 0.5` for a
//! used ship and `1` otherwise, rounded half away from zero to two places.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// The "current" year of the catalog; ships built this year get the full divisor of 1.
pub const CURRENT_YEAR: i32 = 3019;

const SCALE: u32 = 2;

pub fn compute(speed: f64, is_used: bool, prod_year: i32) -> f64 {
    let k = if is_used { 0.5 } else { 1.0 };
    let raw = (80.0 * speed * k) / f64::from(CURRENT_YEAR - prod_year + 1);
    round_half_up(raw, SCALE)
}

/// Round through the shortest decimal form of `value`, so `1.005` becomes `1.01`.
pub fn round_half_up(value: f64, scale: u32) -> f64 {
    Decimal::from_str(&value.to_string())
        .ok()
        .and_then(|d| d.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero).to_f64())
        .unwrap_or_else(|| {
            let factor = 10f64.powi(scale as i32);
            (value * factor).round() / factor
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ship_built_this_year() {
        assert_eq!(compute(0.5, false, 3019), 40.0);
    }

    #[test]
    fn used_ship_built_last_year() {
        assert_eq!(compute(0.5, true, 3018), 10.0);
    }

    fn cents(value: f64) -> i64 {
        (value * 100.0).round() as i64
    }

    #[test]
    fn older_ships_rate_lower() {
        // 80 * 0.99 / 220
        assert_eq!(cents(compute(0.99, false, 2800)), 36);
        assert!(compute(0.5, false, 3000) < compute(0.5, false, 3010));
    }

    #[test]
    fn rounds_to_two_places() {
        // 80 * 0.33 / 7 = 3.7714...
        assert_eq!(cents(compute(0.33, false, 3013)), 377);
        // 80 * 0.01 * 0.5 / 3 = 0.1333...
        assert_eq!(cents(compute(0.01, true, 3017)), 13);
    }

    #[test]
    fn midpoint_goes_away_from_zero() {
        assert_eq!(cents(round_half_up(1.005, 2)), 101);
        assert_eq!(cents(round_half_up(2.675, 2)), 268);
        assert_eq!(cents(round_half_up(-1.005, 2)), -101);
        assert_eq!(cents(round_half_up(0.125, 2)), 13);
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(round_half_up(f64::INFINITY, 2).is_infinite());
        assert!(round_half_up(f64::NAN, 2).is_nan());
    }
}
