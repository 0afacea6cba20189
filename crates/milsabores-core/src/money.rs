//! # Money Module
//!
//! Provides the `Money` type for handling Chilean peso amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The CLP has no minor unit, so every price in the catalog is a whole   │
//! │  number of pesos. We keep it that way end to end: the backend, the     │
//! │  pricing math and the order draft all use i64 pesos. Only the UI      │
//! │  formats with thousands separators ("$25.000").                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use milsabores_core::money::Money;
//!
//! let price = Money::from_clp(25_000);
//! let line = price * 2;                     // $50.000
//! let never_negative = Money::from_clp(100).saturating_sub(Money::from_clp(500));
//! assert!(never_negative.is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Chilean pesos.
///
/// ## Design Decisions
/// - **i64 (signed)**: Intermediate subtractions may dip negative; public
///   pricing results clamp back to zero before they leave the core.
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support (serializes as a plain number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole pesos.
    ///
    /// ## Example
    /// ```rust
    /// use milsabores_core::money::Money;
    ///
    /// let price = Money::from_clp(25_000);
    /// assert_eq!(price.clp(), 25_000);
    /// ```
    #[inline]
    pub const fn from_clp(pesos: i64) -> Self {
        Money(pesos)
    }

    /// Returns the value in whole pesos.
    #[inline]
    pub const fn clp(&self) -> i64 {
        self.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Treats negative amounts as zero.
    ///
    /// Malformed backend data (negative price, negative shipping) is
    /// normalized to zero instead of being propagated into totals.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Subtracts, flooring the result at zero.
    ///
    /// ## Example
    /// ```rust
    /// use milsabores_core::money::Money;
    ///
    /// let base = Money::from_clp(3_000);
    /// let coupon = Money::from_clp(5_000);
    /// assert_eq!(base.saturating_sub(coupon).clp(), 0);
    /// ```
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Self {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub const fn min(self, other: Money) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Torta Cuadrada $25.000
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: $50.000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a percentage discount and returns the discounted unit price.
    ///
    /// ## Rounding
    /// The *discounted price itself* is rounded half-up to the nearest peso;
    /// the discount per unit is the remainder, so
    /// `unit + discount == original` always reconciles. Summing N rounded
    /// unit prices may drift by up to N−1 pesos from discounting the total
    /// once; accepted behavior, never corrected downstream.
    ///
    /// ## Implementation
    /// Integer math on basis points: `(amount * (10000 - bps) + 5000) / 10000`.
    /// The +5000 provides the half-up rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use milsabores_core::money::Money;
    /// use milsabores_core::types::DiscountRate;
    ///
    /// // $999 at 50%: 499.5 rounds up to $500
    /// let unit = Money::from_clp(999).apply_discount(DiscountRate::from_bps(5_000));
    /// assert_eq!(unit.clp(), 500);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        // i128 to prevent overflow on large amounts
        let base = self.clamp_non_negative().0 as i128;
        let keep_bps = (10_000u32.saturating_sub(rate.bps())) as i128;
        let unit = (base * keep_bps + 5_000) / 10_000;
        Money::from_clp(unit as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows pesos with dot thousands separators.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "{}${}", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_clp() {
        let money = Money::from_clp(25_000);
        assert_eq!(money.clp(), 25_000);
    }

    #[test]
    fn test_display_thousands_grouping() {
        assert_eq!(format!("{}", Money::from_clp(25_000)), "$25.000");
        assert_eq!(format!("{}", Money::from_clp(1_234_567)), "$1.234.567");
        assert_eq!(format!("{}", Money::from_clp(500)), "$500");
        assert_eq!(format!("{}", Money::from_clp(-4_500)), "-$4.500");
        assert_eq!(format!("{}", Money::from_clp(0)), "$0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_clp(1_000);
        let b = Money::from_clp(500);

        assert_eq!((a + b).clp(), 1_500);
        assert_eq!((a - b).clp(), 500);
        let result: Money = a * 3;
        assert_eq!(result.clp(), 3_000);
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let base = Money::from_clp(3_000);
        assert_eq!(base.saturating_sub(Money::from_clp(5_000)).clp(), 0);
        assert_eq!(base.saturating_sub(Money::from_clp(1_000)).clp(), 2_000);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_clp(-100).clamp_non_negative().clp(), 0);
        assert_eq!(Money::from_clp(100).clamp_non_negative().clp(), 100);
    }

    #[test]
    fn test_apply_discount_exact() {
        // $25.000 at 50% = $12.500 exactly
        let unit = Money::from_clp(25_000).apply_discount(DiscountRate::from_bps(5_000));
        assert_eq!(unit.clp(), 12_500);
    }

    #[test]
    fn test_apply_discount_rounds_half_up_on_unit() {
        // $999 at 50%: 499.5 → unit rounds UP to 500, discount is 499
        let original = Money::from_clp(999);
        let unit = original.apply_discount(DiscountRate::from_bps(5_000));
        assert_eq!(unit.clp(), 500);
        assert_eq!((original - unit).clp(), 499);
    }

    #[test]
    fn test_apply_discount_full_rate_is_free() {
        let unit = Money::from_clp(45_000).apply_discount(DiscountRate::full());
        assert_eq!(unit.clp(), 0);
    }

    #[test]
    fn test_apply_discount_negative_base_treated_as_zero() {
        let unit = Money::from_clp(-500).apply_discount(DiscountRate::from_bps(1_000));
        assert_eq!(unit.clp(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_clp(100);
        assert!(positive.is_positive());

        let negative = Money::from_clp(-100);
        assert!(negative.is_negative());
    }

    /// Documents the accepted per-unit rounding drift: summing rounded unit
    /// prices can differ from discounting the subtotal once.
    #[test]
    fn test_per_unit_rounding_drift_documented() {
        let rate = DiscountRate::from_bps(5_000);
        let unit = Money::from_clp(999).apply_discount(rate); // 500 each

        let three_units = unit.multiply_quantity(3); // 1.500
        let subtotal_once = Money::from_clp(999 * 3).apply_discount(rate); // 2997 → 1.499 (2998.5→1498.5→1499)

        assert_eq!(three_units.clp(), 1_500);
        assert_eq!(subtotal_once.clp(), 1_499);
        // One peso of drift, per line, is accepted and never reconciled.
        assert_eq!((three_units - subtotal_once).clp(), 1);
    }
}
