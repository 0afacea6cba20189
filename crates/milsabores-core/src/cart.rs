//! # Cart Aggregator
//!
//! Turns raw cart lines into a priced cart breakdown.
//!
//! ## Aggregation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart Aggregation                                    │
//! │                                                                         │
//! │  For each CartLine:                                                     │
//! │    1. Resolve product by id ── missing? ──► DROP line (self-healing)   │
//! │    2. Availability ceiling:                                             │
//! │         birthday cake: min(1, stock)   (one cake per cart)             │
//! │         anything else: stock                                            │
//! │       ceiling 0? ──► DROP line                                          │
//! │    3. quantity = min(max(1, requested), ceiling)                        │
//! │    4. Price the line (pricing::price)                                   │
//! │                                                                         │
//! │  Then sum: subtotal, effective subtotal, discount total, quantity      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping is silent by design: "this product is no longer available" is
//! the UI's message to render, driven by comparing the clamped output
//! against what the user asked for, never an error from here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pricing::{self, PricingResult};
use crate::types::{CartLine, DiscountRate, Product};

// =============================================================================
// Priced Line
// =============================================================================

/// One cart line after resolution, clamping and pricing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedLine {
    /// Snapshot of the resolved product.
    pub product: Product,

    /// Effective quantity after stock clamping.
    pub quantity: i64,

    /// Quantity the customer originally asked for. The UI compares this
    /// against `quantity` to surface "insufficient stock".
    pub requested_quantity: i64,

    /// Optional gift message carried through from the cart line.
    pub message: Option<String>,

    /// Price breakdown for this line.
    pub pricing: PricingResult,
}

impl PricedLine {
    /// Checks whether stock clamping reduced the requested quantity.
    #[inline]
    pub fn is_short(&self) -> bool {
        self.quantity < self.requested_quantity
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// The priced cart breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Surviving lines, in cart order.
    pub lines: Vec<PricedLine>,

    /// Sum of original (undiscounted) line totals.
    pub subtotal_clp: i64,

    /// Sum of discounted line totals.
    pub effective_subtotal_clp: i64,

    /// Sum of per-line discounts.
    pub discount_total_clp: i64,

    /// Sum of effective quantities.
    pub total_quantity: i64,
}

impl CartTotals {
    /// Checks if the cart priced down to nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the birthday-cake line, if the cart holds one.
    pub fn birthday_cake_line(&self) -> Option<&PricedLine> {
        self.lines.iter().find(|line| line.product.is_birthday_cake())
    }

    /// Checks whether the cart is exactly one line and it is the cake.
    pub fn is_cake_only(&self) -> bool {
        self.lines.len() == 1
            && self
                .lines
                .first()
                .map(|line| line.product.is_birthday_cake())
                .unwrap_or(false)
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Aggregates raw cart lines against the current catalog.
///
/// Pure function: callers own cart mutation; this only reads. Lines whose
/// product no longer exists in the catalog are silently dropped, as are
/// lines whose availability ceiling is zero.
pub fn aggregate(
    cart: &[CartLine],
    catalog: &[Product],
    rate: DiscountRate,
    birthday_cake_free: bool,
) -> CartTotals {
    let mut lines = Vec::with_capacity(cart.len());

    for line in cart {
        let Some(product) = catalog.iter().find(|p| p.id == line.product_id) else {
            // Product removed from catalog: cart self-healing
            continue;
        };

        // At most one birthday cake per cart, regardless of stock level
        let ceiling = if product.is_birthday_cake() {
            product.stock.min(1)
        } else {
            product.stock
        };
        if ceiling <= 0 {
            continue;
        }

        let quantity = line.quantity.max(1).min(ceiling);
        let pricing = pricing::price(product, quantity, rate, birthday_cake_free);

        lines.push(PricedLine {
            product: product.clone(),
            quantity,
            requested_quantity: line.quantity,
            message: line.message.clone(),
            pricing,
        });
    }

    let subtotal_clp = lines.iter().map(|l| l.pricing.original_total_clp).sum();
    let effective_subtotal_clp = lines.iter().map(|l| l.pricing.total_clp).sum();
    let discount_total_clp = lines.iter().map(|l| l.pricing.discount_total_clp).sum();
    let total_quantity = lines.iter().map(|l| l.quantity).sum();

    CartTotals {
        lines,
        subtotal_clp,
        effective_subtotal_clp,
        discount_total_clp,
        total_quantity,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
