//! Price arithmetic shared by the order flows.
//!
//! The exchange rejects prices that are not an exact multiple of the
//! instrument's tick size, and it expects prices and amounts as decimal
//! strings rather than JSON numbers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::constants::DECIMAL_PLACES;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("tick size must be a positive finite number, got {0}")]
    InvalidTickSize(f64),

    #[error("price must be a finite number, got {0}")]
    InvalidPrice(f64),
}

/// Round `price` to the nearest multiple of `tick_size`.
///
/// Uses `f64::round`, so exact halves round away from zero.
pub fn round_to_tick(price: f64, tick_size: f64) -> Result<f64, PricingError> {
    if !tick_size.is_finite() || tick_size <= 0.0 {
        return Err(PricingError::InvalidTickSize(tick_size));
    }
    if !price.is_finite() {
        return Err(PricingError::InvalidPrice(price));
    }
    Ok((price / tick_size).round() * tick_size)
}

/// Fixed-point rendering with exactly eight fractional digits.
pub fn format_decimal(value: f64) -> String {
    // Avoid "-0.00000000" for values that rounded to zero from below
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", DECIMAL_PLACES, value)
}

/// A price or amount as it travels on the wire: a JSON string holding a
/// fixed-point decimal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecimalString(String);

impl DecimalString {
    pub fn new(value: f64) -> Self {
        Self(format_decimal(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<f64> for DecimalString {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn is_multiple_of(value: f64, tick: f64) -> bool {
        let ticks = value / tick;
        (ticks - ticks.round()).abs() < 1e-6
    }

    #[test]
    fn test_rounds_to_nearest_tick() {
        assert_eq!(round_to_tick(100.3, 0.5).unwrap(), 100.5);
        assert_eq!(round_to_tick(100.2, 0.5).unwrap(), 100.0);
        assert_eq!(round_to_tick(27_123.4, 2.5).unwrap(), 27_122.5);
        // Exact halves go away from zero
        assert_eq!(round_to_tick(100.25, 0.5).unwrap(), 100.5);
    }

    #[test]
    fn test_result_is_on_tick_and_close_to_price() {
        let ticks = [0.5, 2.5, 0.0001, 0.01, 1.0, 25.0];
        let prices = [0.0, 0.3, 1.7, 99.99, 100.3, 4321.123, 65_000.77, 123_456.789];

        for &tick in &ticks {
            for &price in &prices {
                let rounded = round_to_tick(price, tick).unwrap();
                assert!(
                    is_multiple_of(rounded, tick),
                    "{} is not a multiple of {}",
                    rounded,
                    tick
                );
                assert!(
                    (rounded - price).abs() <= tick / 2.0 + EPSILON,
                    "{} moved too far from {} with tick {}",
                    rounded,
                    price,
                    tick
                );
            }
        }
    }

    #[test]
    fn test_aligned_price_is_unchanged() {
        for &(price, tick) in &[(100.5, 0.5), (27_000.0, 2.5), (0.0125, 0.0005), (3.0, 1.0)] {
            let rounded = round_to_tick(price, tick).unwrap();
            assert!((rounded - price).abs() < EPSILON);
            let again = round_to_tick(rounded, tick).unwrap();
            assert!((again - rounded).abs() < EPSILON);
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert_eq!(round_to_tick(100.0, 0.0), Err(PricingError::InvalidTickSize(0.0)));
        assert_eq!(round_to_tick(100.0, -0.5), Err(PricingError::InvalidTickSize(-0.5)));
        assert!(matches!(round_to_tick(100.0, f64::NAN), Err(PricingError::InvalidTickSize(_))));
        assert!(matches!(round_to_tick(f64::INFINITY, 0.5), Err(PricingError::InvalidPrice(_))));
    }

    #[test]
    fn test_format_has_eight_digits_and_no_exponent() {
        for &value in &[100.5, 0.00000001, 1e-12, 12_345_678.9, 1e15, 0.1 + 0.2, 100.49999999999999] {
            let text = format_decimal(value);
            let (_, fraction) = text.split_once('.').expect("decimal point");
            assert_eq!(fraction.len(), 8, "{}", text);
            assert!(!text.contains('e') && !text.contains('E'), "{}", text);
        }
        assert_eq!(format_decimal(100.49999999999999), "100.50000000");
        assert_eq!(format_decimal(-0.0), "0.00000000");
    }

    #[test]
    fn test_decimal_string_serializes_as_json_string() {
        let price = DecimalString::new(round_to_tick(100.3, 0.5).unwrap());
        assert_eq!(price.as_str(), "100.50000000");
        assert_eq!(serde_json::to_string(&price).unwrap(), r#""100.50000000""#);
    }
}
