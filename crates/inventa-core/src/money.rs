//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float totals:                                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Ten-Thousandths                                  │
//! │    Data files keep plain decimals ("precio": 10.99)                     │
//! │    Everything in memory is i64 ten-thousandths (109_900)                │
//! │    Conversion happens only at the serde boundary and is exact:          │
//! │    amounts finer than 0.0001 are rejected, never rounded                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventa_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let line_total = price.multiply_quantity(3).unwrap();
//! assert_eq!(line_total, Money::from_cents(3297));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Minor units per major unit.
pub const SCALE: i64 = 10_000;

/// Decimal places kept by [`Money`].
pub const DECIMAL_PLACES: u32 = 4;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in ten-thousandths of the currency unit.
///
/// ## Wire Format
/// Serialized as a decimal JSON number so the data files keep the shape
/// `"precio": 10.5`. Any amount with at most four decimals loads exactly and
/// is written back unchanged. Float noise such as `0.30000000000000004` loads
/// as `0.3`; amounts with more decimals than that are rejected.
/// Exported TypeScript types annotate `Money` fields as `number`.
///
/// ## Arithmetic
/// Only checked operations are offered. Callers decide what an overflow
/// means in their context.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──┬──► SalePlan line total ──► Sale.total ──► report revenue
///                 │
/// Product.cost ───┴──► report profit (current price − current cost) × qty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents, saturating at the representable range.
    ///
    /// ## Example
    /// ```rust
    /// use inventa_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents.saturating_mul(SCALE / 100))
    }

    /// Converts a decimal amount without rounding away precision.
    ///
    /// Returns `None` for non-finite amounts, amounts outside the i64 range
    /// and amounts with more than [`DECIMAL_PLACES`] decimals. This is the only
    /// float entry point and exists for the data-file and spreadsheet
    /// boundaries, where amounts arrive as decimals.
    ///
    /// ## Example
    /// ```rust
    /// use inventa_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(10.99), Some(Money::from_cents(1099)));
    /// assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
    /// assert_eq!(Money::from_decimal(0.125).map(|m| m.to_decimal()), Some(0.125));
    /// assert_eq!(Money::from_decimal(0.00001), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let scaled = amount * SCALE as f64;
        let rounded = scaled.round();
        if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
            return None;
        }
        // Anything beyond float noise is a real fifth decimal.
        if (scaled - rounded).abs() > 1e-9 * scaled.abs().max(1.0) {
            return None;
        }
        Some(Money(rounded as i64))
    }

    /// Returns the value as a decimal amount (for serialization only).
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use inventa_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000);
    /// assert_eq!(unit_price.multiply_quantity(3), Some(Money::from_cents(3000)));
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Sums a sequence of amounts, `None` if the total overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering (`-5.50`, `0.125`). Clients format for display themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;
        let (whole, frac) = (abs / scale, abs % scale);
        if frac % 100 == 0 {
            write!(f, "{}{}.{:02}", sign, whole, frac / 100)
        } else {
            let digits = format!("{:04}", frac);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "amount {} is not finite, out of range or has more than {} decimals",
                amount, DECIMAL_PLACES
            ))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_is_exact() {
        assert_eq!(Money::from_decimal(10.99), Some(Money::from_cents(1099)));
        assert_eq!(Money::from_decimal(-5.5), Some(Money::from_cents(-550)));
        assert_eq!(Money::from_decimal(0.125), Some(Money(1250)));
        assert_eq!(Money::from_decimal(0.004), Some(Money(40)));
    }

    #[test]
    fn test_from_decimal_rejects_what_it_cannot_hold() {
        assert_eq!(Money::from_decimal(0.00001), None);
        assert_eq!(Money::from_decimal(1.23456), None);
        assert_eq!(Money::from_decimal(f64::NAN), None);
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
        assert_eq!(Money::from_decimal(1e300), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money(1250).to_string(), "0.125");
        assert_eq!(Money(-40).to_string(), "-0.004");
        assert_eq!(Money(i64::MIN).to_string(), "-922337203685477.5808");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(600);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1600)));
        assert_eq!(a.checked_sub(b), Some(Money::from_cents(400)));
        assert_eq!(a.multiply_quantity(3), Some(Money::from_cents(3000)));
        assert_eq!(Money::checked_sum([a, b, b]), Some(Money::from_cents(2200)));
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let big = Money(i64::MAX);

        assert_eq!(big.checked_add(Money(1)), None);
        assert_eq!(Money(i64::MIN).checked_sub(Money(1)), None);
        assert_eq!(Money::from_cents(1).multiply_quantity(i64::MAX), None);
        assert_eq!(Money::checked_sum([big, big]), None);
    }

    #[test]
    fn test_serializes_as_decimal() {
        let json = serde_json::to_string(&Money::from_cents(3050)).unwrap();
        assert_eq!(json, "30.5");

        let json = serde_json::to_string(&Money::from_cents(3000)).unwrap();
        assert_eq!(json, "30.0");
    }

    #[test]
    fn test_deserializes_integers_and_floats() {
        let m: Money = serde_json::from_str("10").unwrap();
        assert_eq!(m, Money::from_cents(1000));

        let m: Money = serde_json::from_str("0.30000000000000004").unwrap();
        assert_eq!(m, Money::from_cents(30));
    }

    #[test]
    fn test_sub_cent_amounts_survive_a_round_trip() {
        for text in ["0.125", "0.004", "19.9999", "-0.0001"] {
            let m: Money = serde_json::from_str(text).unwrap();
            assert_eq!(serde_json::to_string(&m).unwrap(), text);
        }
        let price: Money = serde_json::from_str("0.125").unwrap();
        assert_eq!(price.multiply_quantity(3).unwrap().to_decimal(), 0.375);
    }

    #[test]
    fn test_deserialize_rejects_fifth_decimal() {
        let err = serde_json::from_str::<Money>("0.00005").unwrap_err();
        assert!(err.to_string().contains("more than 4 decimals"));
    }

    /// Summing in minor units avoids the drift float totals accumulate.
    #[test]
    fn test_no_float_drift_in_sums() {
        let dime = Money::from_decimal(0.1).unwrap();
        let total = Money::checked_sum(std::iter::repeat(dime).take(10)).unwrap();
        assert_eq!(total, Money::from_cents(100));
    }
}
