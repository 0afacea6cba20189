//! # Session State
//!
//! The explicit application-state struct the host app owns: catalog, cart
//! lines, customer profile, coupon input and shipping choice, with explicit
//! read/update operations. Pricing is never stored; it is recomputed from
//! these authoritative inputs on every [`SessionState::quote`] call.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Frontend Action          Operation               State Change          │
//! │  ───────────────          ─────────               ────────────          │
//! │                                                                         │
//! │  Click Product ──────────► add_to_cart() ───────► merge/push line      │
//! │  Change Quantity ────────► update_quantity() ───► line.quantity = n    │
//! │  Click Remove ───────────► remove_line() ───────► lines.remove(i)      │
//! │  Click Clear ────────────► clear_cart() ────────► lines.clear()        │
//! │  Type Coupon ────────────► set_coupon_input() ──► coupon_input = s     │
//! │  Catalog Refresh ────────► set_catalog() ───────► catalog = p, prune   │
//! │  Render Checkout ────────► quote() ─────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! [`StoreState`] wraps the session in `Arc<Mutex<_>>`: the host's UI
//! callbacks may fire concurrently, and only one should mutate at a time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

use milsabores_core::{
    checkout, order, validation, CartLine, CheckoutQuote, CoreError, CoreResult,
    CouponDefinition, CustomerDiscountProfile, Money, OrderDraft, Product, MAX_CART_LINES,
    MAX_LINE_QUANTITY,
};

// =============================================================================
// Session State
// =============================================================================

/// One customer's in-memory session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current product catalog, replaced wholesale on refresh.
    pub catalog: Vec<Product>,

    /// Raw cart lines, keyed by `(product_id, message)`.
    pub cart: Vec<CartLine>,

    /// Authenticated customer, `None` for guest checkout.
    pub profile: Option<CustomerDiscountProfile>,

    /// Coupon catalog, fetched once per session.
    pub coupons: HashMap<String, CouponDefinition>,

    /// Whatever the customer last typed into the coupon field.
    pub coupon_input: String,

    /// Shipping cost of the currently selected delivery option, in pesos.
    pub shipping_clp: i64,
}

impl SessionState {
    /// Creates an empty guest session.
    pub fn new() -> Self {
        SessionState::default()
    }

    // -------------------------------------------------------------------------
    // Catalog & profile
    // -------------------------------------------------------------------------

    /// Replaces the catalog and prunes cart lines whose product disappeared.
    pub fn set_catalog(&mut self, catalog: Vec<Product>) {
        self.catalog = catalog;
        let before = self.cart.len();
        self.cart
            .retain(|line| self.catalog.iter().any(|p| p.id == line.product_id));
        if self.cart.len() < before {
            debug!(
                pruned = before - self.cart.len(),
                "cart lines pruned after catalog refresh"
            );
        }
    }

    /// Replaces the coupon catalog, re-keying by canonical uppercase code.
    pub fn set_coupons(&mut self, coupons: Vec<CouponDefinition>) {
        self.coupons = coupons
            .into_iter()
            .map(|c| (c.code.to_uppercase(), c))
            .collect();
    }

    /// Signs a customer in. Benefits apply from the next quote on.
    pub fn sign_in(&mut self, profile: CustomerDiscountProfile) {
        self.profile = Some(profile);
    }

    /// Signs out, returning to guest checkout. The cart is kept.
    pub fn sign_out(&mut self) {
        self.profile = None;
    }

    // -------------------------------------------------------------------------
    // Cart mutation
    // -------------------------------------------------------------------------

    /// Adds a product to the cart, merging with an existing line that has
    /// the same `(product_id, message)` identity.
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        quantity: i64,
        message: Option<String>,
    ) -> CoreResult<()> {
        validation::validate_quantity(quantity)?;

        let product = self
            .catalog
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        // One birthday cake per cart; everything else is bounded by stock
        let ceiling = if product.is_birthday_cake() {
            product.stock.min(1)
        } else {
            product.stock
        };
        if ceiling <= 0 {
            return Err(CoreError::OutOfStock {
                product_id: product_id.to_string(),
                available: 0,
                requested: quantity,
            });
        }

        if let Some(line) = self
            .cart
            .iter_mut()
            .find(|l| l.matches(product_id, message.as_deref()))
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.cart.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.cart.push(CartLine {
            product_id: product_id.to_string(),
            quantity,
            message,
        });
        Ok(())
    }

    /// Sets the quantity of an existing line; 0 removes it.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        message: Option<&str>,
        quantity: i64,
    ) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_line(product_id, message);
        }

        validation::validate_quantity(quantity)?;

        let line = self
            .cart
            .iter_mut()
            .find(|l| l.matches(product_id, message))
            .ok_or_else(|| CoreError::LineNotFound {
                product_id: product_id.to_string(),
            })?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes the line with the given `(product_id, message)` identity.
    pub fn remove_line(&mut self, product_id: &str, message: Option<&str>) -> CoreResult<()> {
        let before = self.cart.len();
        self.cart.retain(|l| !l.matches(product_id, message));

        if self.cart.len() == before {
            Err(CoreError::LineNotFound {
                product_id: product_id.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Clears the cart and the coupon input.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.coupon_input.clear();
    }

    // -------------------------------------------------------------------------
    // Checkout inputs
    // -------------------------------------------------------------------------

    /// Stores the raw coupon input; validity is decided at quote time.
    pub fn set_coupon_input(&mut self, code: impl Into<String>) {
        self.coupon_input = code.into();
    }

    /// Stores the selected shipping cost in pesos.
    pub fn set_shipping(&mut self, shipping_clp: i64) {
        self.shipping_clp = shipping_clp;
    }

    // -------------------------------------------------------------------------
    // Quoting
    // -------------------------------------------------------------------------

    /// Runs the full pricing pipeline for a specific evaluation date.
    pub fn quote_on(&self, on: chrono::NaiveDate) -> CheckoutQuote {
        checkout::quote(
            &self.cart,
            &self.catalog,
            self.profile.as_ref(),
            &self.coupon_input,
            &self.coupons,
            Money::from_clp(self.shipping_clp),
            on,
        )
    }

    /// Runs the full pricing pipeline as of today.
    pub fn quote(&self) -> CheckoutQuote {
        self.quote_on(Utc::now().date_naive())
    }

    /// Builds the order draft from today's quote.
    pub fn order_draft(&self) -> OrderDraft {
        order::build_order_draft(&self.quote())
    }

    /// Marks the birthday reward as redeemed for the given year.
    ///
    /// Called after a successful order submission whose quote applied the
    /// reward; keeps the once-per-year rule honest within the session even
    /// before the backend echoes the updated profile.
    pub fn mark_birthday_redeemed(&mut self, year: i32) {
        if let Some(profile) = self.profile.as_mut() {
            profile.birthday_redeemed_year = Some(year);
        }
    }
}

// =============================================================================
// Shared Store State
// =============================================================================

/// Thread-safe handle to the session, shared with the host's UI callbacks.
///
/// ## Why Not RwLock?
/// Session operations are quick and most of them mutate; a RwLock would add
/// complexity with minimal benefit.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    session: Arc<Mutex<SessionState>>,
}

impl StoreState {
    /// Creates a new empty store state.
    pub fn new() -> Self {
        StoreState {
            session: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let quote = store.with_session(|s| s.quote());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        let session = self.session.lock().expect("session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// store.with_session_mut(|s| s.add_to_cart("TC001", 1, None))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut session = self.session.lock().expect("session mutex poisoned");
        f(&mut session)
    }

    /// Adds a product to the cart.
    pub fn add_to_cart(
        &self,
        product_id: &str,
        quantity: i64,
        message: Option<String>,
    ) -> CoreResult<()> {
        debug!(product_id, quantity, "add_to_cart");
        self.with_session_mut(|s| s.add_to_cart(product_id, quantity, message))
    }

    /// Removes a cart line.
    pub fn remove_line(&self, product_id: &str, message: Option<&str>) -> CoreResult<()> {
        debug!(product_id, "remove_line");
        self.with_session_mut(|s| s.remove_line(product_id, message))
    }

    /// Clears the cart.
    pub fn clear_cart(&self) {
        debug!("clear_cart");
        self.with_session_mut(|s| s.clear_cart());
    }

    /// Prices the current session as of today.
    pub fn quote(&self) -> CheckoutQuote {
        self.with_session(|s| s.quote())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
