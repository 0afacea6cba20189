//! # Coupon Evaluator
//!
//! Validates a single user-entered coupon code against the session's coupon
//! catalog and computes its effect on the post-benefits subtotal and
//! shipping cost.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Coupon Evaluation                                   │
//! │                                                                         │
//! │  Input code ──► trim + uppercase                                        │
//! │       │                                                                 │
//! │       ├── empty? ─────────────────────────► invalid                     │
//! │       ├── equals FELICES50? ──────────────► invalid (registration       │
//! │       │                                     benefit, never a coupon)    │
//! │       ├── not in catalog? ────────────────► invalid                     │
//! │       │                                                                 │
//! │       ├── FlatAmount ──► discount = clamp(value, 0, subtotal)          │
//! │       │                  shipping unchanged                             │
//! │       │                                                                 │
//! │       └── FreeShipping ► discount = 0, shipping forced to 0            │
//! │                          (tolerates shipping already 0)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invalid codes return an inert result; the caller decides the messaging.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CouponDefinition, CouponKind};
use crate::RESERVED_PROMO_CODE;

// =============================================================================
// Coupon Evaluation Result
// =============================================================================

/// The effect of one coupon code on a checkout. Value type, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CouponEval {
    /// Whether the code resolved to a usable coupon.
    pub valid: bool,

    /// Normalized (trimmed, uppercased) code as evaluated.
    pub code: String,

    /// Label of the matched coupon, when valid.
    pub label: Option<String>,

    /// Kind of the matched coupon, when valid.
    pub kind: Option<CouponKind>,

    /// Pesos off the post-benefits subtotal (flat-amount kind only).
    pub discount_clp: i64,

    /// Shipping cost after the coupon.
    pub shipping_after_clp: i64,
}

impl CouponEval {
    /// The inert result for an empty, reserved, or unknown code.
    fn invalid(code: String, shipping: Money) -> Self {
        CouponEval {
            valid: false,
            code,
            label: None,
            kind: None,
            discount_clp: 0,
            shipping_after_clp: shipping.clp(),
        }
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Evaluates a coupon code against the coupon catalog.
///
/// ## Arguments
/// * `code` - raw user input; normalized here
/// * `subtotal_after_benefits` - goods total after benefit discounts
/// * `shipping` - shipping cost after the benefit waiver (may already be 0)
/// * `coupons` - session coupon catalog, keyed by canonical uppercase code
///
/// Total function: never fails, unknown codes come back `valid: false`.
pub fn evaluate(
    code: &str,
    subtotal_after_benefits: Money,
    shipping: Money,
    coupons: &HashMap<String, CouponDefinition>,
) -> CouponEval {
    let normalized = code.trim().to_uppercase();
    let subtotal = subtotal_after_benefits.clamp_non_negative();
    let shipping = shipping.clamp_non_negative();

    // The registration promo code is never redeemable as a cart coupon
    if normalized.is_empty() || normalized == RESERVED_PROMO_CODE {
        return CouponEval::invalid(normalized, shipping);
    }

    let Some(definition) = coupons.get(&normalized) else {
        return CouponEval::invalid(normalized, shipping);
    };

    match definition.kind {
        CouponKind::FlatAmount => {
            // Never discounts below a zero subtotal
            let discount = definition.value().min(subtotal);
            CouponEval {
                valid: true,
                code: normalized,
                label: Some(definition.label.clone()),
                kind: Some(CouponKind::FlatAmount),
                discount_clp: discount.clp(),
                shipping_after_clp: shipping.clp(),
            }
        }
        CouponKind::FreeShipping => CouponEval {
            valid: true,
            code: normalized,
            label: Some(definition.label.clone()),
            kind: Some(CouponKind::FreeShipping),
            discount_clp: 0,
            shipping_after_clp: 0,
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> HashMap<String, CouponDefinition> {
        let mut coupons = HashMap::new();
        coupons.insert(
            "5000OFF".to_string(),
            CouponDefinition {
                code: "5000OFF".to_string(),
                kind: CouponKind::FlatAmount,
                value_clp: 5_000,
                label: "$5.000 de descuento".to_string(),
            },
        );
        coupons.insert(
            "ENVIOGRATIS".to_string(),
            CouponDefinition {
                code: "ENVIOGRATIS".to_string(),
                kind: CouponKind::FreeShipping,
                value_clp: 0,
                label: "Envío gratis".to_string(),
            },
        );
        coupons
    }

    #[test]
    fn test_flat_amount_coupon() {
        let result = evaluate(
            "5000OFF",
            Money::from_clp(20_000),
            Money::from_clp(3_000),
            &catalog(),
        );

        assert!(result.valid);
        assert_eq!(result.discount_clp, 5_000);
        assert_eq!(result.shipping_after_clp, 3_000); // shipping untouched
        assert_eq!(result.kind, Some(CouponKind::FlatAmount));
    }

    #[test]
    fn test_flat_amount_clamped_to_subtotal() {
        // Subtotal 3.000, coupon worth 5.000 → discount 3.000, never negative
        let result = evaluate(
            "5000OFF",
            Money::from_clp(3_000),
            Money::from_clp(3_000),
            &catalog(),
        );

        assert!(result.valid);
        assert_eq!(result.discount_clp, 3_000);
    }

    #[test]
    fn test_code_normalization() {
        let result = evaluate(
            "  5000off ",
            Money::from_clp(20_000),
            Money::zero(),
            &catalog(),
        );
        assert!(result.valid);
        assert_eq!(result.code, "5000OFF");
    }

    #[test]
    fn test_free_shipping_coupon() {
        let result = evaluate(
            "ENVIOGRATIS",
            Money::from_clp(20_000),
            Money::from_clp(3_000),
            &catalog(),
        );

        assert!(result.valid);
        assert_eq!(result.discount_clp, 0);
        assert_eq!(result.shipping_after_clp, 0);
    }

    #[test]
    fn test_free_shipping_tolerates_zero_shipping() {
        // Already waived by the birthday benefit: still valid, still 0
        let result = evaluate("ENVIOGRATIS", Money::from_clp(20_000), Money::zero(), &catalog());
        assert!(result.valid);
        assert_eq!(result.shipping_after_clp, 0);
    }

    #[test]
    fn test_empty_code_invalid() {
        let result = evaluate("   ", Money::from_clp(20_000), Money::from_clp(3_000), &catalog());
        assert!(!result.valid);
        assert_eq!(result.discount_clp, 0);
        assert_eq!(result.shipping_after_clp, 3_000);
    }

    #[test]
    fn test_reserved_promo_code_rejected_as_coupon() {
        // Even if someone seeds it into the coupon catalog
        let mut coupons = catalog();
        coupons.insert(
            crate::RESERVED_PROMO_CODE.to_string(),
            CouponDefinition {
                code: crate::RESERVED_PROMO_CODE.to_string(),
                kind: CouponKind::FlatAmount,
                value_clp: 1_000,
                label: "No debería aplicar".to_string(),
            },
        );

        let result = evaluate("felices50", Money::from_clp(20_000), Money::zero(), &coupons);
        assert!(!result.valid);
    }

    #[test]
    fn test_unknown_code_invalid() {
        let result = evaluate("NADA", Money::from_clp(20_000), Money::from_clp(3_000), &catalog());
        assert!(!result.valid);
    }

    #[test]
    fn test_negative_inputs_treated_as_zero() {
        let result = evaluate(
            "5000OFF",
            Money::from_clp(-100),
            Money::from_clp(-200),
            &catalog(),
        );
        assert!(result.valid);
        assert_eq!(result.discount_clp, 0);
        assert_eq!(result.shipping_after_clp, 0);
    }
}
