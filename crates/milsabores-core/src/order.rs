//! # Order Draft
//!
//! The priced payload the storefront hands to the backend when the customer
//! confirms checkout. Persistence is the backend's job; this module only
//! shapes the data.
//!
//! ## Snapshot Pattern
//! Each draft line freezes the product's name and prices as computed at
//! checkout time, so later catalog edits cannot change what the customer
//! agreed to pay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::checkout::CheckoutQuote;
use crate::money::Money;

// =============================================================================
// Order Draft Line
// =============================================================================

/// One priced line of the order draft.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDraftLine {
    /// Product catalog code.
    pub product_id: String,

    /// Product name at checkout time (frozen).
    pub name: String,

    /// Quantity ordered (after stock clamping).
    pub quantity: i64,

    /// Discounted unit price in pesos (frozen).
    pub unit_price_clp: i64,

    /// Undiscounted unit price in pesos (frozen).
    pub original_unit_price_clp: i64,

    /// Pesos off per unit.
    pub discount_per_unit_clp: i64,

    /// Benefit labels that applied to this line.
    pub benefit_labels: Vec<String>,

    /// Optional gift message.
    pub message: Option<String>,
}

// =============================================================================
// Order Draft
// =============================================================================

/// The order payload submitted to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDraft {
    /// Client-generated draft id (UUID v4).
    pub id: String,

    /// When the draft was built.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Priced lines, in cart order.
    pub lines: Vec<OrderDraftLine>,

    /// Undiscounted goods subtotal.
    pub subtotal_clp: i64,

    /// Everything taken off the goods: benefit discounts plus the coupon.
    pub discount_total_clp: i64,

    /// Shipping charged.
    pub shipping_clp: i64,

    /// Amount the customer pays.
    pub total_clp: i64,

    /// Order-level benefit labels.
    pub benefit_labels: Vec<String>,

    /// Redeemed coupon code, if one was valid.
    pub coupon_code: Option<String>,

    /// Redeemed coupon label, if one was valid.
    pub coupon_label: Option<String>,
}

/// Builds the order draft from a checkout quote.
///
/// Per-line labels: the cake line carries the birthday label when the
/// reward was applied; any other discounted line carries the percentage
/// discount label.
pub fn build_order_draft(quote: &CheckoutQuote) -> OrderDraft {
    let benefits = &quote.benefits;
    let final_total = &quote.final_total;

    let lines = quote
        .totals
        .lines
        .iter()
        .map(|line| {
            let mut labels = Vec::new();
            if benefits.birthday_reward_applied && line.product.is_birthday_cake() {
                labels.extend(benefits.birthday_label.clone());
            } else if line.pricing.discount_total_clp > 0 {
                labels.extend(benefits.discount_label.clone());
            }

            OrderDraftLine {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                quantity: line.quantity,
                unit_price_clp: line.pricing.unit_price_clp,
                original_unit_price_clp: line.pricing.original_unit_price_clp,
                discount_per_unit_clp: line.pricing.discount_per_unit_clp,
                benefit_labels: labels,
                message: line.message.clone(),
            }
        })
        .collect();

    let coupon = &final_total.coupon;
    let coupon_discount = if coupon.valid {
        Money::from_clp(coupon.discount_clp)
    } else {
        Money::zero()
    };
    let discount_total = Money::from_clp(benefits.discount_amount_clp)
        + Money::from_clp(benefits.birthday_discount_clp)
        + coupon_discount;

    OrderDraft {
        id: Uuid::new_v4().to_string(),
        created_at: Utc::now(),
        lines,
        subtotal_clp: final_total.subtotal_clp,
        discount_total_clp: discount_total.clp(),
        shipping_clp: final_total.shipping_clp,
        total_clp: final_total.total_clp,
        benefit_labels: benefits.labels(),
        coupon_code: coupon.valid.then(|| coupon.code.clone()),
        coupon_label: coupon.label.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout;
    use crate::types::{CartLine, CouponDefinition, CouponKind, CustomerDiscountProfile, Product};
    use chrono::NaiveDate;
    use std::collections::HashMap;

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
        map
    }

    fn birthday_profile() -> CustomerDiscountProfile {
        CustomerDiscountProfile {
            email: "cliente@duocuc.cl".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1960, 8, 25),
            promo_code: None,
            permanent_discount: false,
            birthday_redeemed_year: None,
        }
    }

    #[test]
    fn test_draft_carries_line_snapshots_and_labels() {
        // Senior + birthday: cake line gets the birthday label, the other
        // line gets the senior label.
        let catalog = vec![
            test_product(crate::BIRTHDAY_CAKE_PRODUCT_ID, 40_000, 5),
            test_product("TC001", 25_000, 10),
        ];
        let p = birthday_profile();
        let cart = vec![
            CartLine {
                product_id: crate::BIRTHDAY_CAKE_PRODUCT_ID.to_string(),
                quantity: 1,
                message: Some("¡Feliz cumpleaños!".to_string()),
            },
            CartLine {
                product_id: "TC001".to_string(),
                quantity: 1,
                message: None,
            },
        ];

        let quote = checkout::quote(
            &cart,
            &catalog,
            Some(&p),
            "",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );
        let draft = build_order_draft(&quote);

        assert_eq!(draft.lines.len(), 2);

        let cake_line = &draft.lines[0];
        assert_eq!(cake_line.unit_price_clp, 0);
        assert_eq!(cake_line.original_unit_price_clp, 40_000);
        assert_eq!(cake_line.benefit_labels, vec!["Torta de cumpleaños gratis"]);
        assert_eq!(cake_line.message.as_deref(), Some("¡Feliz cumpleaños!"));

        let torta_line = &draft.lines[1];
        assert_eq!(torta_line.unit_price_clp, 12_500);
        assert_eq!(
            torta_line.benefit_labels,
            vec!["Descuento mayor de 50 años (50%)"]
        );

        assert!(!draft.id.is_empty());
        assert_eq!(draft.subtotal_clp, 65_000);
        // 40.000 cake + 12.500 senior
        assert_eq!(draft.discount_total_clp, 52_500);
        assert_eq!(draft.total_clp, 12_500 + 3_000);
        assert!(draft.coupon_code.is_none());
    }

    #[test]
    fn test_draft_includes_valid_coupon() {
        let catalog = vec![test_product("TC001", 20_000, 10)];
        let cart = vec![CartLine {
            product_id: "TC001".to_string(),
            quantity: 1,
            message: None,
        }];

        let quote = checkout::quote(
            &cart,
            &catalog,
            None,
            "5000off",
            &coupons(),
            Money::from_clp(3_000),
            today(),
        );
        let draft = build_order_draft(&quote);

        assert_eq!(draft.coupon_code.as_deref(), Some("5000OFF"));
        assert_eq!(draft.coupon_label.as_deref(), Some("$5.000 de descuento"));
        assert_eq!(draft.discount_total_clp, 5_000);
        assert_eq!(draft.total_clp, 18_000);
        // Undiscounted line carries no benefit labels
        assert!(draft.lines[0].benefit_labels.is_empty());
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let catalog = vec![test_product("TC001", 20_000, 10)];
        let cart = vec![CartLine {
            product_id: "TC001".to_string(),
            quantity: 1,
            message: None,
        }];

        let quote = checkout::quote(
            &cart,
            &catalog,
            None,
            "",
            &coupons(),
            Money::zero(),
            today(),
        );
        let json = serde_json::to_value(build_order_draft(&quote)).unwrap();

        assert!(json.get("subtotalClp").is_some());
        assert!(json.get("benefitLabels").is_some());
        assert!(json["lines"][0].get("unitPriceClp").is_some());
    }
}
