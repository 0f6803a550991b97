//! Monetary rounding shared by both ledgers

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to whole cents
///
/// The exact binary value of `amount` is rounded half-to-even, so a value
/// printed as `0.125` is a true tie and rounds to `0.12`, while `1.005`
/// (stored just below the tie) rounds to `1.0`. Non-finite input is
/// returned unchanged.
pub fn round_cents(amount: f64) -> f64 {
    let exact = match Decimal::from_f64_retain(amount) {
        Some(value) => value,
        None => return amount,
    };
    let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    // One correctly rounded division gives the f64 nearest the decimal result
    rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32)
}

/// True when `amount` is a usable non-negative monetary input (rejects NaN)
pub(crate) fn is_non_negative(amount: f64) -> bool {
    amount >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1033.7712), 1033.77);
        assert_eq!(round_cents(140_555.49), 140_555.49);
        assert_eq!(round_cents(1_100.0), 1_100.0);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        assert_eq!(round_cents(0.125), 0.12);
        assert_eq!(round_cents(0.375), 0.38);
        assert_eq!(round_cents(-345.625), -345.62);
    }

    #[test]
    fn test_inexact_ties_follow_binary_value() {
        // 478.285 is stored as 478.28500000000002...
        assert_eq!(round_cents(478.285), 478.29);
        // 0.005 is stored as 0.00500000000000000010...
        assert_eq!(round_cents(0.005), 0.01);
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(round_cents(1.005), 1.0);
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert!(round_cents(f64::NAN).is_nan());
        assert_eq!(round_cents(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_non_negative_rejects_nan() {
        assert!(is_non_negative(0.0));
        assert!(is_non_negative(12.5));
        assert!(!is_non_negative(-0.01));
        assert!(!is_non_negative(f64::NAN));
    }
}
