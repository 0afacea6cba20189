//! # Checkout Totalizer
//!
//! Composes Pricing → Cart → Benefits → Coupon into one final total.
//!
//! ## Composition Order (fixed: reordering changes results when several
//! discounts interact with clamping)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Totalization Steps                                 │
//! │                                                                         │
//! │  1. base  = max(0, subtotal − birthday discount − % discount)          │
//! │  2. ship₀ = free shipping granted ? 0 : selected shipping              │
//! │  3. coupon = evaluate(code, base, ship₀)                               │
//! │  4. ship  = free shipping granted ? 0                                  │
//! │             : coupon valid ? coupon shipping : ship₀                   │
//! │  5. total = max(0, base − coupon discount) + ship                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every subtraction is clamped at zero: no discount combination can carry
//! a negative amount forward.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::benefits::{self, BenefitsResult};
use crate::cart::{self, CartTotals};
use crate::coupon::{self, CouponEval};
use crate::money::Money;
use crate::types::{CartLine, CouponDefinition, CustomerDiscountProfile, Product};

// =============================================================================
// Final Total
// =============================================================================

/// The fully composed checkout total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinalTotal {
    /// Undiscounted goods subtotal.
    pub subtotal_clp: i64,

    /// Senior/promo percentage discount taken off.
    pub benefit_discount_clp: i64,

    /// Birthday-cake discount taken off.
    pub birthday_discount_clp: i64,

    /// Goods total after both benefit discounts, floored at 0.
    pub base_after_benefits_clp: i64,

    /// Coupon evaluation against the post-benefits figures.
    pub coupon: CouponEval,

    /// Shipping actually charged.
    pub shipping_clp: i64,

    /// Amount the customer pays.
    pub total_clp: i64,
}

// =============================================================================
// Totalization
// =============================================================================

/// Composes benefits, coupon and shipping into the final total.
///
/// The five-step order documented on this module is normative.
pub fn totalize(
    totals: &CartTotals,
    benefits: &BenefitsResult,
    coupon_code: &str,
    coupons: &HashMap<String, CouponDefinition>,
    selected_shipping: Money,
) -> FinalTotal {
    // Step 1: goods base after benefit discounts, floored at zero
    let base = Money::from_clp(totals.subtotal_clp)
        .saturating_sub(Money::from_clp(benefits.birthday_discount_clp))
        .saturating_sub(Money::from_clp(benefits.discount_amount_clp));

    // Step 2: shipping before the coupon
    let ship_before_coupon = if benefits.free_shipping_granted {
        Money::zero()
    } else {
        selected_shipping.clamp_non_negative()
    };

    // Step 3: coupon sees the post-benefits figures
    let coupon = coupon::evaluate(coupon_code, base, ship_before_coupon, coupons);

    // Step 4: the benefit waiver always wins; otherwise a valid coupon's
    // shipping replaces the selected one
    let shipping = if benefits.free_shipping_granted {
        Money::zero()
    } else if coupon.valid {
        Money::from_clp(coupon.shipping_after_clp)
    } else {
        ship_before_coupon
    };

    // Step 5
    let coupon_discount = if coupon.valid {
        Money::from_clp(coupon.discount_clp)
    } else {
        Money::zero()
    };
    let total = base.saturating_sub(coupon_discount) + shipping;

    FinalTotal {
        subtotal_clp: totals.subtotal_clp,
        benefit_discount_clp: benefits.discount_amount_clp,
        birthday_discount_clp: benefits.birthday_discount_clp,
        base_after_benefits_clp: base.clp(),
        coupon,
        shipping_clp: shipping.clp(),
        total_clp: total.clp(),
    }
}

// =============================================================================
// Full Quote Pipeline
// =============================================================================

/// Everything the checkout screen needs, computed in one pass.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutQuote {
    /// Priced cart breakdown.
    pub totals: CartTotals,

    /// Benefit evaluation for this cart.
    pub benefits: BenefitsResult,

    /// Final composed total.
    pub final_total: FinalTotal,
}

/// Runs the whole pricing pipeline for one cart + profile + date.
///
/// This is the single entry point the session shell re-runs on every
/// relevant state change (cart edit, coupon input, profile load); it ties
/// the discount rate and birthday availability used for per-line pricing
/// to the same profile and date the benefits evaluator sees.
pub fn quote(
    cart_lines: &[CartLine],
    catalog: &[Product],
    profile: Option<&CustomerDiscountProfile>,
    coupon_code: &str,
    coupons: &HashMap<String, CouponDefinition>,
    selected_shipping: Money,
    on: NaiveDate,
) -> CheckoutQuote {
    let rate = benefits::discount_rate(profile, on);
    let cake_free = profile
        .map(|p| benefits::birthday_reward_available(p, on))
        .unwrap_or(false);

    let totals = cart::aggregate(cart_lines, catalog, rate, cake_free);
    let benefits = benefits::evaluate(&totals, profile, on);
    let final_total = totalize(&totals, &benefits, coupon_code, coupons, selected_shipping);

    CheckoutQuote {
        totals,
        benefits,
        final_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CouponKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn test_product(id: &str, price: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Producto {}", id),
            category: "Tortas".to_string(),
            base_price_clp: price,
            stock,
            critical_stock: None,
            description: None,
        }
    }

    fn line(product_id: &str, quantity: i64) -> CartLine {
        CartLine {
            product_id: product_id.to_string(),
            quantity,
            message: None,
        }
    }

    fn coupons() -> HashMap<String, CouponDefinition> {
        let mut map = HashMap::new();
        map.insert(
            "5000OFF".to_string(),
            CouponDefinition {
                code: "5000OFF".to_string(),
                kind: CouponKind::FlatAmount,
                value_clp: 5_000,
                label: "$5.000 de descuento".to_string(),
            },
        );
        map.insert(
            "ENVIOGRATIS".to_string(),
            CouponDefinition {
                code: "ENVIOGRATIS".to_string(),
                kind: CouponKind::FreeShipping,
                value_clp: 0,
                label: "Envío gratis".to_string(),
            },
        );
        map
    }

    fn birthday_profile() -> CustomerDiscountProfile {
        CustomerDiscountProfile {
            email: "cliente@duocuc.cl".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2000, 8, 25),
            promo_code: None,
            permanent_discount: false,
            birthday_redeemed_year: None,
        }
    }

    #[test]
    fn test_flat_coupon_then_shipping() {
        // Subtotal 20.000 after benefits, shipping 3.000, coupon flat 5.000
        // → total = max(0, 20.000 − 5.000) + 3.000 = 18.000
        let catalog = vec![test_product("TC001", 20_000, 10)];
        let q = quote(
            &[line("TC001", 1)],
            &catalog,
            None,
            "5000OFF",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );

        assert_eq!(q.final_total.base_after_benefits_clp, 20_000);
        assert_eq!(q.final_total.coupon.discount_clp, 5_000);
        assert_eq!(q.final_total.shipping_clp, 3_000);
        assert_eq!(q.final_total.total_clp, 18_000);
    }

    #[test]
    fn test_coupon_clamp_never_goes_negative() {
        // Base 3.000, coupon worth 5.000 → pays shipping only
        let catalog = vec![test_product("TT001", 3_000, 10)];
        let q = quote(
            &[line("TT001", 1)],
            &catalog,
            None,
            "5000OFF",
            &coupons(),
            Money::from_clp(2_500),
            today(),
        );

        assert_eq!(q.final_total.coupon.discount_clp, 3_000);
        assert_eq!(q.final_total.total_clp, 2_500);
    }

    #[test]
    fn test_cake_only_birthday_cart_totals_zero() {
        // Cake alone, reward available → cake free AND shipping free
        let catalog = vec![test_product(crate::BIRTHDAY_CAKE_PRODUCT_ID, 40_000, 5)];
        let p = birthday_profile();
        let q = quote(
            &[line(crate::BIRTHDAY_CAKE_PRODUCT_ID, 1)],
            &catalog,
            Some(&p),
            "",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );

        assert!(q.benefits.birthday_reward_applied);
        assert!(q.benefits.free_shipping_granted);
        assert_eq!(q.final_total.base_after_benefits_clp, 0);
        assert_eq!(q.final_total.shipping_clp, 0);
        assert_eq!(q.final_total.total_clp, 0);
    }

    #[test]
    fn test_cake_plus_product_pays_shipping() {
        let catalog = vec![
            test_product(crate::BIRTHDAY_CAKE_PRODUCT_ID, 40_000, 5),
            test_product("TC001", 25_000, 10),
        ];
        let p = birthday_profile();
        let q = quote(
            &[line(crate::BIRTHDAY_CAKE_PRODUCT_ID, 1), line("TC001", 1)],
            &catalog,
            Some(&p),
            "",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );

        assert!(q.benefits.birthday_reward_applied);
        assert!(!q.benefits.free_shipping_granted);
        // 65.000 − 40.000 (cake) + 3.000 shipping
        assert_eq!(q.final_total.total_clp, 28_000);
    }

    #[test]
    fn test_free_shipping_coupon_overrides_selected_shipping() {
        let catalog = vec![test_product("TC001", 20_000, 10)];
        let q = quote(
            &[line("TC001", 1)],
            &catalog,
            None,
            "ENVIOGRATIS",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );

        assert_eq!(q.final_total.shipping_clp, 0);
        assert_eq!(q.final_total.total_clp, 20_000);
    }

    #[test]
    fn test_benefit_waiver_and_free_shipping_coupon_do_not_go_negative() {
        // Both grant free shipping: result is zero shipping, not negative
        let catalog = vec![test_product(crate::BIRTHDAY_CAKE_PRODUCT_ID, 40_000, 5)];
        let p = birthday_profile();
        let q = quote(
            &[line(crate::BIRTHDAY_CAKE_PRODUCT_ID, 1)],
            &catalog,
            Some(&p),
            "ENVIOGRATIS",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );

        assert!(q.final_total.coupon.valid);
        assert_eq!(q.final_total.shipping_clp, 0);
        assert_eq!(q.final_total.total_clp, 0);
    }

    #[test]
    fn test_invalid_coupon_leaves_totals_alone() {
        let catalog = vec![test_product("TC001", 20_000, 10)];
        let q = quote(
            &[line("TC001", 1)],
            &catalog,
            None,
            "NADA",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );

        assert!(!q.final_total.coupon.valid);
        assert_eq!(q.final_total.total_clp, 23_000);
    }

    #[test]
    fn test_senior_discount_flows_through_quote() {
        let catalog = vec![test_product("TC001", 25_000, 10)];
        let mut p = birthday_profile();
        p.email = "cliente@gmail.com".to_string(); // no birthday reward
        p.birth_date = NaiveDate::from_ymd_opt(1970, 1, 1); // senior

        let q = quote(
            &[line("TC001", 2)],
            &catalog,
            Some(&p),
            "",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );

        assert_eq!(q.totals.effective_subtotal_clp, 25_000);
        assert_eq!(q.final_total.benefit_discount_clp, 25_000);
        assert_eq!(q.final_total.total_clp, 28_000);
    }

    #[test]
    fn test_negative_shipping_treated_as_zero() {
        let catalog = vec![test_product("TC001", 20_000, 10)];
        let q = quote(
            &[line("TC001", 1)],
            &catalog,
            None,
            "",
            &coupons(),
            Money::from_clp(-500),
            today(),
        );
        assert_eq!(q.final_total.shipping_clp, 0);
        assert_eq!(q.final_total.total_clp, 20_000);
    }
}
