//! Numeric tolerance policy.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use eqv_types::Number;

use crate::error::ComparatorError;

/// Rounding slack, in units in the last place, granted at the boundary.
const ULP_SLACK: f64 = 4.0;

/// `true` when `|actual - expected| <= |delta|`.
///
/// Integer pairs are compared exactly. Two infinities are equal when their
/// signs match; any other infinity or NaN is never within tolerance. With a
/// positive delta the boundary allows a few ULPs of rounding slack, so that
/// `10.0` and `10.0 + 0.05` are within `0.05`.
pub fn within_tolerance(expected: Number, actual: Number, delta: f64) -> bool {
    let delta = delta.abs();
    if let (Number::Int(e), Number::Int(a)) = (expected, actual) {
        let diff = (i128::from(a) - i128::from(e)).unsigned_abs();
        return diff == 0 || (diff as f64) <= delta;
    }

    let (e, a) = (expected.as_f64(), actual.as_f64());
    if e.is_infinite() && a.is_infinite() {
        return e.is_sign_positive() == a.is_sign_positive();
    }
    if e.is_infinite() || a.is_infinite() || e.is_nan() || a.is_nan() {
        return false;
    }

    let diff = (a - e).abs();
    if diff <= delta {
        return true;
    }
    delta > 0.0 && diff - delta <= ULP_SLACK * f64::EPSILON * e.abs().max(a.abs())
}

/// The scale (digits after the decimal point) of a decimal, never negative.
pub fn decimal_scale(value: &BigDecimal) -> u64 {
    let (_, exponent) = value.as_bigint_and_exponent();
    u64::try_from(exponent).unwrap_or(0)
}

/// `delta` rounded to `scale` fractional digits, as a decimal.
pub fn decimal_delta(delta: f64, scale: u64) -> Result<BigDecimal, ComparatorError> {
    let digits = usize::try_from(scale)
        .map_err(|_| ComparatorError::InvalidOperand(format!("decimal scale {scale} too large")))?;
    let text = format!("{:.*}", digits, delta.abs());
    BigDecimal::from_str(&text)
        .map_err(|_| ComparatorError::InvalidOperand(format!("delta {delta} is not a finite number")))
}

/// `true` unless `actual < expected - delta || actual > expected + delta`,
/// with delta taken at the larger of the two operands' scales.
pub fn decimals_within_tolerance(
    expected: &BigDecimal,
    actual: &BigDecimal,
    delta: f64,
) -> Result<bool, ComparatorError> {
    let scale = decimal_scale(expected).max(decimal_scale(actual));
    let delta = decimal_delta(delta, scale)?;
    let lower = expected - &delta;
    let upper = expected + &delta;
    Ok(!(*actual < lower || *actual > upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn integers_are_exact() {
        assert!(within_tolerance(Number::Int(i64::MAX), Number::Int(i64::MAX), 0.0));
        assert!(!within_tolerance(Number::Int(i64::MAX), Number::Int(i64::MAX - 1), 0.0));
        assert!(within_tolerance(Number::Int(i64::MIN), Number::Int(i64::MAX), f64::MAX));
        assert!(within_tolerance(Number::Int(5), Number::Int(3), 2.0));
        assert!(within_tolerance(Number::Int(5), Number::Int(3), -2.0));
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let delta = 0.05;
        assert!(within_tolerance(Number::Float(10.0), Number::Float(10.0 + delta), delta));
        assert!(!within_tolerance(
            Number::Float(10.0),
            Number::Float(10.0 + delta + 0.001),
            delta
        ));
        assert!(within_tolerance(Number::Float(2.3), Number::Float(2.5), 0.5));
    }

    #[test]
    fn zero_delta_has_no_slack() {
        assert!(!within_tolerance(Number::Float(0.1 + 0.2), Number::Float(0.3), 0.0));
        assert!(within_tolerance(Number::Int(1), Number::Float(1.0), 0.0));
    }

    #[test]
    fn infinities_and_nan() {
        let inf = Number::Float(f64::INFINITY);
        let neg = Number::Float(f64::NEG_INFINITY);
        let nan = Number::Float(f64::NAN);
        assert!(within_tolerance(inf, inf, 0.0));
        assert!(!within_tolerance(inf, neg, 0.0));
        assert!(!within_tolerance(inf, Number::Float(1.0), f64::MAX));
        assert!(!within_tolerance(nan, nan, 1.0));
    }

    #[test]
    fn decimal_scale_and_delta() {
        assert_eq!(decimal_scale(&dec("13.370000")), 6);
        assert_eq!(decimal_scale(&dec("42")), 0);
        assert_eq!(decimal_delta(0.001, 2).unwrap(), dec("0.00"));
        assert_eq!(decimal_delta(-0.5, 3).unwrap(), dec("0.500"));
        assert!(decimal_delta(f64::INFINITY, 2).is_err());
    }

    #[test]
    fn decimal_window() {
        assert!(decimals_within_tolerance(&dec("1.23"), &dec("1.23"), 0.0).unwrap());
        assert!(!decimals_within_tolerance(&dec("1.23"), &dec("1.24"), 0.0).unwrap());
        assert!(decimals_within_tolerance(&dec("1.23"), &dec("1.24"), 0.01).unwrap());
        assert!(!decimals_within_tolerance(&dec("1.23"), &dec("1.24"), 0.004).unwrap());
    }

    proptest! {
        #[test]
        fn reflexive_for_finite_floats(f in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            prop_assert!(within_tolerance(Number::Float(f), Number::Float(f), 0.0));
        }

        #[test]
        fn symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6, delta in 0f64..10.0) {
            prop_assert_eq!(
                within_tolerance(Number::Float(a), Number::Float(b), delta),
                within_tolerance(Number::Float(b), Number::Float(a), delta)
            );
        }
    }
}
