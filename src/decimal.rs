/// Decimal-to-fixed-point conversion
///
/// Order sizes and prices arrive as human-readable decimal strings and the
/// contract expects them as scaled integers (a price of 1.0 is 1e9). The
/// conversion must be exact: a one-unit discrepancy changes the digest and
/// the exchange rejects the signature with no feedback. Everything here
/// goes through `rust_decimal`; no binary floating point is ever involved.

use rust_decimal::Decimal;

use crate::error::{Result, SignerError};

/// Fixed global price scale: a price of 1.0 is 1_000_000_000 contract units
pub const PRICE_SCALE: u32 = 9;

/// Convert a decimal string to the unique integer `value * 10^scale`.
///
/// Digits beyond the target scale are rejected with `InvalidAmount` rather
/// than truncated: an order silently signed for a different size than the
/// caller asked for would verify on chain and fill at the wrong quantity.
pub fn to_scaled_u64(value: &str, scale: u32) -> Result<u64> {
    let invalid = |reason: &str| SignerError::InvalidAmount {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Decimal::from_str_exact(value.trim())
        .map_err(|_| invalid("not a valid decimal number"))?;

    if parsed.is_zero() {
        return Ok(0);
    }
    if parsed.is_sign_negative() {
        return Err(invalid("must not be negative"));
    }

    // normalize() strips trailing zeros, so "1.500" at scale 9 is fine
    // while "1.0000000001" is a genuine precision loss
    let normalized = parsed.normalize();
    if normalized.scale() > scale {
        return Err(invalid("more fractional digits than the target scale"));
    }

    let factor = 10i128
        .checked_pow(scale - normalized.scale())
        .ok_or_else(|| invalid("scale too large"))?;
    let scaled = normalized
        .mantissa()
        .checked_mul(factor)
        .ok_or_else(|| invalid("overflows the fixed-point range"))?;

    u64::try_from(scaled).map_err(|_| invalid("overflows the fixed-point range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_exactness() {
        // 1.5 with base_decimals=9 must be exactly 1_500_000_000
        assert_eq!(to_scaled_u64("1.5", 9).unwrap(), 1_500_000_000);
    }

    #[test]
    fn test_price_exactness() {
        // 115038.01 at the global price scale must be exactly 115_038_010_000_000
        assert_eq!(to_scaled_u64("115038.01", PRICE_SCALE).unwrap(), 115_038_010_000_000);
    }

    #[test]
    fn test_trailing_zeros_are_not_precision_loss() {
        assert_eq!(to_scaled_u64("1.500000000", 9).unwrap(), 1_500_000_000);
        assert_eq!(to_scaled_u64("2.000", 0).unwrap(), 2);
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(to_scaled_u64("0", 9).unwrap(), 0);
        assert_eq!(to_scaled_u64("0.0", 9).unwrap(), 0);
    }

    #[test]
    fn test_integer_values() {
        assert_eq!(to_scaled_u64("42", 9).unwrap(), 42_000_000_000);
        assert_eq!(to_scaled_u64("42", 0).unwrap(), 42);
    }

    #[test]
    fn test_rejects_precision_loss() {
        // 10 fractional digits against a scale of 9
        let err = to_scaled_u64("1.0000000001", 9).unwrap_err();
        assert!(matches!(err, SignerError::InvalidAmount { .. }));

        let err = to_scaled_u64("0.001", 2).unwrap_err();
        assert!(matches!(err, SignerError::InvalidAmount { .. }));
    }

    #[test]
    fn test_rejects_garbage_and_negatives() {
        assert!(to_scaled_u64("abc", 9).is_err());
        assert!(to_scaled_u64("", 9).is_err());
        assert!(to_scaled_u64("1.2.3", 9).is_err());
        assert!(to_scaled_u64("-1.5", 9).is_err());
    }

    #[test]
    fn test_u64_boundary() {
        // u64::MAX == 18446744073709551615
        assert_eq!(
            to_scaled_u64("18446744073709.551615", 6).unwrap(),
            u64::MAX
        );
        assert!(to_scaled_u64("18446744073709.551616", 6).is_err());
    }
}
