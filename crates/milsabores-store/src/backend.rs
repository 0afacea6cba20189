//! # Backend Collaborator
//!
//! The boundary between the session shell and whatever transport the host
//! application uses (fetch in the browser build, reqwest in tooling).
//!
//! ## Refresh & Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  refresh()                        place_order()                         │
//! │  ─────────                        ─────────────                         │
//! │  fetch_catalog ──► validate ──┐   quote ──► build draft                 │
//! │  fetch_profile ──► validate ──┼─► session  submit_order ──► clear cart │
//! │  fetch_coupons ──► validate ──┘            mark birthday redeemed      │
//! │                                                                         │
//! │  Invalid entries are skipped with a warning, never fatal.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use milsabores_core::{CouponDefinition, CustomerDiscountProfile, OrderDraft, Product};

use crate::dto::{RawCoupon, RawProduct, RawProfile};
use crate::error::{BackendError, StoreError};
use crate::state::StoreState;

// =============================================================================
// Collaborator Trait
// =============================================================================

/// What the host application's HTTP client must provide.
///
/// Methods return the raw DTOs; validation into core types happens on this
/// side of the boundary so every host gets the same tolerance policy.
#[allow(async_fn_in_trait)]
pub trait CommerceBackend {
    /// Fetches the full product catalog.
    async fn fetch_catalog(&self) -> Result<Vec<RawProduct>, BackendError>;

    /// Fetches the signed-in customer's profile, `None` for guests.
    async fn fetch_profile(&self) -> Result<Option<RawProfile>, BackendError>;

    /// Fetches the active coupon catalog.
    async fn fetch_coupons(&self) -> Result<Vec<RawCoupon>, BackendError>;

    /// Submits a finished order draft.
    async fn submit_order(&self, draft: &OrderDraft) -> Result<OrderConfirmation, BackendError>;
}

/// The backend's acknowledgement of a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Backend-assigned order id.
    pub order_id: String,

    /// Total the backend recorded, echoed for reconciliation.
    pub total_clp: i64,
}

// =============================================================================
// Refresh
// =============================================================================

/// Pulls catalog, profile and coupons from the backend into the session.
///
/// Individual malformed entries are skipped with a warning; only transport
/// failures abort the refresh.
pub async fn refresh<B: CommerceBackend>(
    state: &StoreState,
    backend: &B,
) -> Result<(), StoreError> {
    let raw_catalog = backend.fetch_catalog().await?;
    let catalog: Vec<Product> = raw_catalog
        .into_iter()
        .filter_map(|raw| match Product::try_from(raw) {
            Ok(product) => Some(product),
            Err(err) => {
                warn!(%err, "skipping malformed catalog entry");
                None
            }
        })
        .collect();

    let profile = match backend.fetch_profile().await? {
        Some(raw) => match CustomerDiscountProfile::try_from(raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(%err, "skipping malformed profile, continuing as guest");
                None
            }
        },
        None => None,
    };

    let raw_coupons = backend.fetch_coupons().await?;
    let coupons: Vec<CouponDefinition> = raw_coupons
        .into_iter()
        .filter_map(|raw| match CouponDefinition::try_from(raw) {
            Ok(coupon) => Some(coupon),
            Err(err) => {
                warn!(%err, "skipping malformed coupon");
                None
            }
        })
        .collect();

    info!(
        products = catalog.len(),
        coupons = coupons.len(),
        signed_in = profile.is_some(),
        "session refreshed"
    );

    state.with_session_mut(|s| {
        s.set_catalog(catalog);
        s.set_coupons(coupons);
        match profile {
            Some(p) => s.sign_in(p),
            None => s.sign_out(),
        }
    });

    Ok(())
}

// =============================================================================
// Order Placement
// =============================================================================

/// Quotes the current session, submits the resulting draft, and on success
/// clears the cart and records a redeemed birthday reward.
pub async fn place_order<B: CommerceBackend>(
    state: &StoreState,
    backend: &B,
) -> Result<OrderConfirmation, StoreError> {
    let (draft, birthday_applied) = state.with_session(|s| {
        let quote = s.quote();
        let applied = quote.benefits.birthday_reward_applied;
        (milsabores_core::order::build_order_draft(&quote), applied)
    });

    if draft.lines.is_empty() {
        return Err(StoreError::EmptyCart);
    }

    let confirmation = backend.submit_order(&draft).await?;
    info!(
        order_id = %confirmation.order_id,
        total_clp = confirmation.total_clp,
        "order placed"
    );

    state.with_session_mut(|s| {
        if birthday_applied {
            s.mark_birthday_redeemed(Utc::now().year());
        }
        s.clear_cart();
    });

    Ok(confirmation)
}

// =============================================================================
// Unit Tests
// =============================================================================
