//! # Pricing Calculator
//!
//! Computes per-unit and per-line prices for a product given the customer's
//! discount rate.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Per-Line Pricing                                   │
//! │                                                                         │
//! │  Product (base price) ─┬─► general case:                               │
//! │                        │     unit = round_half_up(base × (1 − rate))   │
//! │                        │                                                │
//! │                        └─► birthday cake + reward available:           │
//! │                              unit = 0, rate = 100%                     │
//! │                                                                         │
//! │  discount_per_unit = base − unit     (non-negative by construction)    │
//! │  total             = unit × qty                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totality
//! `price` never fails: an invalid quantity defaults to 1 and a negative
//! base price is treated as zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DiscountRate, Product};

// =============================================================================
// Pricing Result
// =============================================================================

/// The price breakdown for one cart line. Value type, never stored.
///
/// ## Invariants
/// - `unit_price_clp + discount_per_unit_clp == original_unit_price_clp`
/// - `total_clp == unit_price_clp × quantity`
/// - every amount is non-negative
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingResult {
    /// Undiscounted unit price (the product's recorded base price).
    pub original_unit_price_clp: i64,

    /// Unit price after the discount, rounded half-up, floored at 0.
    pub unit_price_clp: i64,

    /// Discount rate actually applied, in basis points.
    pub discount_bps: u32,

    /// Pesos off per unit.
    pub discount_per_unit_clp: i64,

    /// Quantity the line was priced for (coerced to ≥ 1).
    pub quantity: i64,

    /// `original_unit_price × quantity`.
    pub original_total_clp: i64,

    /// `discount_per_unit × quantity`.
    pub discount_total_clp: i64,

    /// `unit_price × quantity`.
    pub total_clp: i64,
}

impl PricingResult {
    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_clp(self.total_clp)
    }

    /// Returns the undiscounted line total as Money.
    #[inline]
    pub fn original_total(&self) -> Money {
        Money::from_clp(self.original_total_clp)
    }

    /// Returns the line discount as Money.
    #[inline]
    pub fn discount_total(&self) -> Money {
        Money::from_clp(self.discount_total_clp)
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Prices one product line.
///
/// ## Arguments
/// * `product` - the catalog product (read-only)
/// * `requested_qty` - desired quantity; anything below 1 is coerced to 1
/// * `rate` - the customer's general discount rate (senior/promo)
/// * `birthday_cake_free` - whether the birthday reward is currently
///   available (see `benefits::birthday_reward_available`)
///
/// ## Birthday-Cake Special Case
/// When `product` is the birthday cake and the reward is available, the
/// line is unconditionally 100% off, regardless of the general rate.
///
/// ## Rounding
/// The discounted unit price is rounded half-up per unit (see
/// `Money::apply_discount`); line totals are the rounded unit times the
/// quantity. The resulting drift against discounting the subtotal once is
/// accepted, not corrected.
pub fn price(
    product: &Product,
    requested_qty: i64,
    rate: DiscountRate,
    birthday_cake_free: bool,
) -> PricingResult {
    let quantity = requested_qty.max(1);
    let original_unit = product.price().clamp_non_negative();

    let (unit, applied_rate) = if product.is_birthday_cake() && birthday_cake_free {
        (Money::zero(), DiscountRate::full())
    } else {
        (original_unit.apply_discount(rate), rate)
    };

    let discount_per_unit = original_unit - unit;

    PricingResult {
        original_unit_price_clp: original_unit.clp(),
        unit_price_clp: unit.clp(),
        discount_bps: applied_rate.bps(),
        discount_per_unit_clp: discount_per_unit.clp(),
        quantity,
        original_total_clp: original_unit.multiply_quantity(quantity).clp(),
        discount_total_clp: discount_per_unit.multiply_quantity(quantity).clp(),
        total_clp: unit.multiply_quantity(quantity).clp(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
