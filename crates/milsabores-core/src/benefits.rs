//! # Benefits Evaluator
//!
//! Determines which profile-driven (non-coupon) benefits apply to a priced
//! cart: the senior/promo percentage discount, the free birthday cake, and
//! the birthday-tied shipping waiver.
//!
//! ## Rule Summary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Benefit Rules                                        │
//! │                                                                         │
//! │  Discount rate (exclusive, age wins):                                  │
//! │    age > 50 ─────────────────────────────► 50%                         │
//! │    else FELICES50 code or permanent flag ► 10%                         │
//! │    else ─────────────────────────────────► 0%                          │
//! │                                                                         │
//! │  Birthday reward:                                                       │
//! │    eligible  = academic email AND today is birth month/day             │
//! │    available = eligible AND not yet redeemed this calendar year        │
//! │    applied   = available AND the cart holds the cake                   │
//! │                                                                         │
//! │  Free shipping:                                                         │
//! │    applied AND the cake is the ONLY line in the cart                   │
//! │                                                                         │
//! │  Guest session ──► all-zero result                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The percentage discount and the birthday discount are computed
//! independently against original line amounts and both subtracted from the
//! subtotal; they are additive, never multiplicatively stacked.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartTotals;
use crate::money::Money;
use crate::types::{CustomerDiscountProfile, DiscountRate};
use crate::{PROMO_DISCOUNT_RATE, RESERVED_PROMO_CODE, SENIOR_AGE_YEARS, SENIOR_DISCOUNT_RATE};

// =============================================================================
// Benefits Result
// =============================================================================

/// The outcome of benefit evaluation for one cart + profile + date.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BenefitsResult {
    /// Resolved general discount rate in basis points.
    pub discount_bps: u32,

    /// Pesos taken off by the senior/promo percentage discount, against
    /// original line amounts.
    pub discount_amount_clp: i64,

    /// Label for the percentage discount, when one applies.
    pub discount_label: Option<String>,

    /// Pesos taken off by the free birthday cake.
    pub birthday_discount_clp: i64,

    /// Label for the birthday reward, when applied.
    pub birthday_label: Option<String>,

    /// Whether today is the customer's birthday and the email qualifies.
    pub birthday_eligible_today: bool,

    /// Whether the cake discount was actually applied to this cart.
    pub birthday_reward_applied: bool,

    /// Whether shipping is waived (cake-only cart with the reward applied).
    pub free_shipping_granted: bool,

    /// Label for the shipping waiver, when granted.
    pub free_shipping_label: Option<String>,
}

impl BenefitsResult {
    /// The zero-effect result used for guest checkout.
    pub fn none() -> Self {
        BenefitsResult {
            discount_bps: 0,
            discount_amount_clp: 0,
            discount_label: None,
            birthday_discount_clp: 0,
            birthday_label: None,
            birthday_eligible_today: false,
            birthday_reward_applied: false,
            free_shipping_granted: false,
            free_shipping_label: None,
        }
    }

    /// All labels that apply, for the order draft and checkout summary.
    pub fn labels(&self) -> Vec<String> {
        [
            self.discount_label.as_ref(),
            self.birthday_label.as_ref(),
            self.free_shipping_label.as_ref(),
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

// =============================================================================
// Discount Rate Rule
// =============================================================================

/// Resolves the customer's general discount rate on the given date.
///
/// Age-based and promo-based discounts are mutually exclusive: a customer
/// over 50 gets 50% even if they also hold the promo benefit.
pub fn discount_rate(profile: Option<&CustomerDiscountProfile>, on: NaiveDate) -> DiscountRate {
    let Some(profile) = profile else {
        return DiscountRate::zero();
    };

    let is_senior = profile
        .age_on(on)
        .map(|age| age > SENIOR_AGE_YEARS)
        .unwrap_or(false);

    if is_senior {
        SENIOR_DISCOUNT_RATE
    } else if profile.has_reserved_promo_code() || profile.permanent_discount {
        PROMO_DISCOUNT_RATE
    } else {
        DiscountRate::zero()
    }
}

// =============================================================================
// Birthday Reward Rules
// =============================================================================

/// Eligibility: academic email AND the date is the birth month/day.
pub fn birthday_reward_eligible(profile: &CustomerDiscountProfile, on: NaiveDate) -> bool {
    profile.has_academic_email() && profile.is_birthday(on)
}

/// Availability: eligible AND not already redeemed this calendar year.
pub fn birthday_reward_available(profile: &CustomerDiscountProfile, on: NaiveDate) -> bool {
    birthday_reward_eligible(profile, on) && profile.birthday_redeemed_year != Some(on.year())
}

// =============================================================================
// Evaluation
// =============================================================================

/// Evaluates all benefits for a priced cart.
///
/// `totals` must have been aggregated with this profile's discount rate and
/// birthday availability (see `checkout::quote`, which ties the pipeline
/// together); the evaluator attributes the per-line discounts already
/// present in the totals to the right benefit bucket.
pub fn evaluate(
    totals: &CartTotals,
    profile: Option<&CustomerDiscountProfile>,
    on: NaiveDate,
) -> BenefitsResult {
    let Some(profile) = profile else {
        return BenefitsResult::none();
    };

    let rate = discount_rate(Some(profile), on);
    let eligible = birthday_reward_eligible(profile, on);
    let available = birthday_reward_available(profile, on);

    // Attribute per-line discounts: the cake's 100% (when available) is the
    // birthday bucket, everything else is the percentage bucket.
    let mut percentage_amount = Money::zero();
    let mut birthday_amount = Money::zero();
    for line in &totals.lines {
        let discount = line.pricing.discount_total();
        if available && line.product.is_birthday_cake() {
            birthday_amount += discount;
        } else {
            percentage_amount += discount;
        }
    }

    let applied = available && birthday_amount.is_positive();
    let free_shipping = applied && totals.is_cake_only();

    let discount_label = if rate.is_zero() {
        None
    } else {
        let pct = rate.percent_rounded();
        let senior = profile
            .age_on(on)
            .map(|age| age >= SENIOR_AGE_YEARS)
            .unwrap_or(false);
        if senior && pct >= 50 {
            Some(format!("Descuento mayor de 50 años ({}%)", pct))
        } else if profile.permanent_discount {
            Some(format!("Beneficio {} ({}%)", RESERVED_PROMO_CODE, pct))
        } else {
            Some(format!("Beneficio cliente ({}%)", pct))
        }
    };

    BenefitsResult {
        discount_bps: rate.bps(),
        discount_amount_clp: percentage_amount.clp(),
        discount_label,
        birthday_discount_clp: birthday_amount.clp(),
        birthday_label: applied.then(|| "Torta de cumpleaños gratis".to_string()),
        birthday_eligible_today: eligible,
        birthday_reward_applied: applied,
        free_shipping_granted: free_shipping,
        free_shipping_label: free_shipping.then(|| "Envío gratis de cumpleaños".to_string()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
