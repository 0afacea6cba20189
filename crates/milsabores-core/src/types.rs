//! # Domain Types
//!
//! Core domain types for the storefront pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │    Product      │   │    CartLine     │   │ CustomerDiscount-    │  │
//! │  │  ─────────────  │   │  ─────────────  │   │ Profile              │  │
//! │  │  id (catalog)   │   │  product_id     │   │  ──────────────────  │  │
//! │  │  base_price_clp │   │  quantity       │   │  birth_date          │  │
//! │  │  stock          │   │  message        │   │  promo_code          │  │
//! │  │  critical_stock │   │  (gift note)    │   │  permanent_discount  │  │
//! │  └─────────────────┘   └─────────────────┘   └──────────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  DiscountRate   │   │ CouponDefinition│                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  code, kind,    │                             │
//! │  │  5000 = 50%     │   │  value, label   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cart Line Identity
//! A cart line is keyed by `(product_id, message)`, not `product_id` alone:
//! two birthday cakes with different gift messages are two distinct lines.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{ACADEMIC_EMAIL_SUFFIX, BIRTHDAY_CAKE_PRODUCT_ID, RESERVED_PROMO_CODE};

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 5000 bps = 50% (senior discount), 1000 bps = 10% (promo benefit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points, capped at 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > 10_000 {
            DiscountRate(10_000)
        } else {
            DiscountRate(bps)
        }
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a whole percent, rounded to nearest (for labels).
    #[inline]
    pub const fn percent_rounded(&self) -> u32 {
        (self.0 + 50) / 100
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Full discount (100% off), the birthday-cake override.
    #[inline]
    pub const fn full() -> Self {
        DiscountRate(10_000)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product, supplied read-only by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog code, e.g. "TC001". Stable business key.
    pub id: String,

    /// Display name shown in catalog and on orders.
    pub name: String,

    /// Category label, e.g. "Tortas Cuadradas".
    pub category: String,

    /// Recorded base price in whole pesos.
    ///
    /// For the birthday cake this keeps the cake's economic value even
    /// though its *displayed* catalog price is forced to zero.
    pub base_price_clp: i64,

    /// Units currently available.
    pub stock: i64,

    /// Threshold below which the admin screens flag low stock.
    pub critical_stock: Option<i64>,

    /// Optional long description.
    pub description: Option<String>,
}

impl Product {
    /// Returns the recorded base price as Money (economic value).
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_clp(self.base_price_clp)
    }

    /// Returns the price shown in the catalog view.
    ///
    /// The birthday cake always displays as $0; everything else displays
    /// its recorded base price.
    pub fn display_price(&self) -> Money {
        if self.is_birthday_cake() {
            Money::zero()
        } else {
            self.price()
        }
    }

    /// Checks whether this is the reserved birthday-cake product.
    #[inline]
    pub fn is_birthday_cake(&self) -> bool {
        self.id == BIRTHDAY_CAKE_PRODUCT_ID
    }

    /// Checks whether stock has fallen to or below the critical threshold.
    pub fn is_low_stock(&self) -> bool {
        match self.critical_stock {
            Some(threshold) => self.stock <= threshold,
            None => false,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A raw cart line as held by the session, before pricing.
///
/// ## Identity
/// Lines are keyed by `(product_id, message)` so the same product can appear
/// twice with different gift messages.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product catalog code.
    pub product_id: String,

    /// Requested quantity. The aggregator clamps this against stock.
    pub quantity: i64,

    /// Optional gift message for this line.
    pub message: Option<String>,
}

impl CartLine {
    /// Checks whether this line matches the given identity key.
    pub fn matches(&self, product_id: &str, message: Option<&str>) -> bool {
        self.product_id == product_id && self.message.as_deref() == message
    }
}

// =============================================================================
// Customer Discount Profile
// =============================================================================

/// The discount-relevant slice of an authenticated customer's profile.
///
/// ## Invariant
/// `permanent_discount`, once true, is a one-way grant: clearing the
/// `promo_code` field later does not revoke the 10% benefit.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDiscountProfile {
    /// Account email; the academic-domain rule for the birthday reward
    /// tests against this.
    pub email: String,

    /// Date of birth, if the customer provided one.
    #[ts(as = "Option<String>")]
    pub birth_date: Option<NaiveDate>,

    /// Promo code currently stored on the profile (editable).
    pub promo_code: Option<String>,

    /// One-way grant recorded when the reserved code was redeemed at
    /// registration time.
    pub permanent_discount: bool,

    /// Last calendar year the birthday reward was claimed.
    pub birthday_redeemed_year: Option<i32>,
}

impl CustomerDiscountProfile {
    /// Completed age in years on the given date, if a birth date is known.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        if birth > on {
            return Some(0);
        }
        let mut age = on.year() - birth.year();
        // Not yet had the birthday this year
        if (on.month(), on.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age.max(0) as u32)
    }

    /// Checks whether the stored promo code equals the reserved code,
    /// case-insensitively.
    pub fn has_reserved_promo_code(&self) -> bool {
        self.promo_code
            .as_deref()
            .map(|code| code.trim().eq_ignore_ascii_case(RESERVED_PROMO_CODE))
            .unwrap_or(false)
    }

    /// Checks whether the email belongs to the academic domain.
    pub fn has_academic_email(&self) -> bool {
        self.email
            .trim()
            .to_ascii_lowercase()
            .ends_with(ACADEMIC_EMAIL_SUFFIX)
    }

    /// Checks whether the given date is the customer's birthday
    /// (month/day match).
    pub fn is_birthday(&self, on: NaiveDate) -> bool {
        match self.birth_date {
            Some(birth) => birth.month() == on.month() && birth.day() == on.day(),
            None => false,
        }
    }
}

// =============================================================================
// Coupon Definition
// =============================================================================

/// The effect a coupon has at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// Flat amount off the post-benefits subtotal.
    FlatAmount,
    /// Shipping forced to zero; subtotal unaffected.
    FreeShipping,
}

/// A redeemable checkout coupon, sourced from the backend catalog.
/// Immutable within a session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CouponDefinition {
    /// Uppercase canonical code.
    pub code: String,

    /// What the coupon does.
    pub kind: CouponKind,

    /// Amount off in pesos; meaningful only for `FlatAmount`.
    pub value_clp: i64,

    /// Human-readable label shown at checkout and on the order.
    pub label: String,
}

impl CouponDefinition {
    /// Returns the coupon value as Money, negative values treated as zero.
    #[inline]
    pub fn value(&self) -> Money {
        Money::from_clp(self.value_clp).clamp_non_negative()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str, birth: Option<NaiveDate>) -> CustomerDiscountProfile {
        CustomerDiscountProfile {
            email: email.to_string(),
            birth_date: birth,
            promo_code: None,
            permanent_discount: false,
            birthday_redeemed_year: None,
        }
    }

    #[test]
    fn test_discount_rate_caps_at_full() {
        assert_eq!(DiscountRate::from_bps(12_000).bps(), 10_000);
        assert_eq!(DiscountRate::full().percent_rounded(), 100);
        assert_eq!(DiscountRate::from_bps(5_000).percent_rounded(), 50);
        assert_eq!(DiscountRate::from_bps(1_050).percent_rounded(), 11);
    }

    #[test]
    fn test_birthday_cake_display_price_is_zero() {
        let cake = Product {
            id: crate::BIRTHDAY_CAKE_PRODUCT_ID.to_string(),
            name: "Torta Especial de Cumpleaños".to_string(),
            category: "Tortas Especiales".to_string(),
            base_price_clp: 40_000,
            stock: 5,
            critical_stock: None,
            description: None,
        };
        assert!(cake.is_birthday_cake());
        assert_eq!(cake.display_price().clp(), 0);
        // Economic value survives the display override
        assert_eq!(cake.price().clp(), 40_000);
    }

    #[test]
    fn test_low_stock_flag() {
        let mut product = Product {
            id: "TC001".to_string(),
            name: "Torta Cuadrada de Chocolate".to_string(),
            category: "Tortas Cuadradas".to_string(),
            base_price_clp: 45_000,
            stock: 3,
            critical_stock: Some(5),
            description: None,
        };
        assert!(product.is_low_stock());

        product.stock = 10;
        assert!(!product.is_low_stock());

        product.critical_stock = None;
        product.stock = 0;
        assert!(!product.is_low_stock());
    }

    #[test]
    fn test_cart_line_identity_includes_message() {
        let line = CartLine {
            product_id: "TC001".to_string(),
            quantity: 1,
            message: Some("Feliz cumpleaños".to_string()),
        };
        assert!(line.matches("TC001", Some("Feliz cumpleaños")));
        assert!(!line.matches("TC001", None));
        assert!(!line.matches("TC001", Some("Felicidades")));
    }

    #[test]
    fn test_age_on_counts_completed_years() {
        let p = profile("ana@duocuc.cl", NaiveDate::from_ymd_opt(1970, 6, 15));

        // Day before the birthday: still 54
        let before = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        assert_eq!(p.age_on(before), Some(54));

        // On the birthday: 55
        let on = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(p.age_on(on), Some(55));
    }

    #[test]
    fn test_age_on_without_birth_date() {
        let p = profile("ana@gmail.com", None);
        assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), None);
    }

    #[test]
    fn test_reserved_promo_code_is_case_insensitive() {
        let mut p = profile("ana@gmail.com", None);
        p.promo_code = Some("felices50".to_string());
        assert!(p.has_reserved_promo_code());

        p.promo_code = Some(" FELICES50 ".to_string());
        assert!(p.has_reserved_promo_code());

        p.promo_code = Some("OTRO".to_string());
        assert!(!p.has_reserved_promo_code());
    }

    #[test]
    fn test_academic_email_suffix_match() {
        assert!(profile("Ana@DuocUC.cl", None).has_academic_email());
        assert!(!profile("ana@gmail.com", None).has_academic_email());
        assert!(!profile("duocuc.cl@gmail.com", None).has_academic_email());
    }

    #[test]
    fn test_is_birthday_matches_month_and_day() {
        let p = profile("ana@duocuc.cl", NaiveDate::from_ymd_opt(2000, 8, 25));
        assert!(p.is_birthday(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()));
        assert!(!p.is_birthday(NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()));
    }
}
