//! Money calculation utilities using rust_decimal for precision
//!
//! All allocation and plan arithmetic is done in `Decimal` internally, then
//! converted to `f64` at the serialization boundary. Comparisons are made
//! at two-decimal precision after rounding each intermediate sum; binary
//! float arithmetic never participates.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Minimum-contribution rate (10% of the target amount)
const MIN_CONTRIBUTION_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Convert f64 to Decimal for calculation
///
/// If NaN/Infinity reaches here, logs an error and returns ZERO to avoid
/// silent corruption in monetary calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for serialization, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round2(value)
        .to_f64()
        // SAFETY: a Decimal rounded to 2dp is always within f64 range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Round a Decimal to 2 decimal places, half away from zero
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compare two monetary values for equality at 2 decimal places
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (round2(a) - round2(b)).abs() < MONEY_TOLERANCE
}

/// Minimum contribution for a target amount: 10%, rounded up to a whole
/// major unit (25.00 requires 3.00, not 2.50).
pub fn min_contribution(target: Decimal) -> Decimal {
    (target * MIN_CONTRIBUTION_RATE).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_to_decimal_finite() {
        assert_eq!(to_decimal(12.34), dec("12.34"));
        assert_eq!(to_decimal(0.0), Decimal::ZERO);
    }

    #[test]
    fn test_to_decimal_non_finite_defaults_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_to_f64_rounds_half_up() {
        assert_eq!(to_f64(dec("10.005")), 10.01);
        assert_eq!(to_f64(dec("10.004")), 10.00);
    }

    #[test]
    fn test_money_eq_at_two_decimals() {
        assert!(money_eq(dec("100.004"), dec("100.00")));
        assert!(!money_eq(dec("100.01"), dec("100.00")));
        assert!(money_eq(dec("39.999"), dec("40.0")));
    }

    #[test]
    fn test_min_contribution_whole_unit_ceiling() {
        assert_eq!(min_contribution(dec("25.00")), dec("3"));
        assert_eq!(min_contribution(dec("100.00")), dec("10"));
        assert_eq!(min_contribution(dec("101.00")), dec("11"));
        assert_eq!(min_contribution(Decimal::ZERO), Decimal::ZERO);
    }
}
