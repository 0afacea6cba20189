//! # milsabores-core: Pure Pricing Logic for the Mil Sabores Storefront
//!
//! This crate is the **heart** of the storefront: every peso shown in the
//! cart, at checkout, and on a persisted order is computed here, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mil Sabores Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Order History    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               milsabores-store (session shell)                  │   │
//! │  │    catalog, cart lines, profile, coupon input, shipping        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ milsabores-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ ┌──────────┐ │   │
//! │  │   │ pricing │ │  cart   │ │ benefits │ │ coupon │ │ checkout │ │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, CustomerDiscountProfile, ...)
//! - [`money`] - Money type in whole Chilean pesos (no floating point!)
//! - [`pricing`] - Per-unit/per-line price computation
//! - [`cart`] - Cart aggregation (self-healing, stock clamping)
//! - [`benefits`] - Senior/promo/birthday benefit evaluation
//! - [`coupon`] - Checkout coupon evaluation
//! - [`checkout`] - Final total composition
//! - [`order`] - Order draft payload for the backend
//! - [`validation`] - Input validation at the data boundary
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same cart + profile + date in, same totals out
//! 2. **Total Functions**: pricing never throws; it clamps and defaults
//! 3. **Integer Money**: CLP has no minor unit, so prices are whole `i64` pesos
//! 4. **Explicit Dates**: benefit rules take the evaluation date as an argument
//!
//! ## Example Usage
//!
//! ```rust
//! use milsabores_core::money::Money;
//! use milsabores_core::types::DiscountRate;
//!
//! // $25.000 CLP with the 50% senior discount
//! let price = Money::from_clp(25_000);
//! let half = price.apply_discount(DiscountRate::from_bps(5_000));
//! assert_eq!(half.clp(), 12_500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod benefits;
pub mod cart;
pub mod checkout;
pub mod coupon;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use milsabores_core::Money` instead of
// `use milsabores_core::money::Money`

pub use benefits::BenefitsResult;
pub use cart::{CartTotals, PricedLine};
pub use checkout::{CheckoutQuote, FinalTotal};
pub use coupon::CouponEval;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderDraft, OrderDraftLine};
pub use pricing::PricingResult;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Catalog id of the reserved birthday-cake product.
///
/// ## Why a constant?
/// The birthday reward mechanic is tied to exactly one catalog item. Its
/// displayed price in the catalog is forced to zero, but its recorded base
/// price keeps its economic value for discount attribution.
pub const BIRTHDAY_CAKE_PRODUCT_ID: &str = "TE001";

/// Reserved registration promo code granting the permanent 10% benefit.
///
/// This code is a registration benefit, never a cart coupon: the coupon
/// evaluator rejects it outright.
pub const RESERVED_PROMO_CODE: &str = "FELICES50";

/// Email-domain suffix gating the birthday reward.
pub const ACADEMIC_EMAIL_SUFFIX: &str = "@duocuc.cl";

/// Age (in completed years) a customer must EXCEED for the senior discount.
///
/// Strictly greater than: a customer on their 50th birthday is not yet
/// eligible, one day past their 51st is.
pub const SENIOR_AGE_YEARS: u32 = 50;

/// Senior discount rate (50%).
pub const SENIOR_DISCOUNT_RATE: types::DiscountRate = types::DiscountRate::from_bps(5_000);

/// Promo/permanent-benefit discount rate (10%).
pub const PROMO_DISCOUNT_RATE: types::DiscountRate = types::DiscountRate::from_bps(1_000);

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps re-pricing on every keystroke cheap.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
