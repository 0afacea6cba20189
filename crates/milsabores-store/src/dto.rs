//! # Backend DTOs
//!
//! Loosely-typed payloads as the REST backend actually sends them, and
//! their validated conversions into the core's strong types.
//!
//! ## Why a Separate Layer?
//! The backend's JSON is duck-typed: fields go missing, numbers arrive
//! negative, dates arrive as strings. All of that is resolved HERE, once,
//! so the pricing core only ever sees well-formed `Product`,
//! `CustomerDiscountProfile` and `CouponDefinition` values.
//!
//! ## Tolerance Policy
//! - Missing identity fields (id, name, email, code) → conversion error;
//!   the caller skips the entry with a warning.
//! - Malformed monetary/stock values → clamped to 0, per the "negative
//!   means zero" rule of the core.
//! - Malformed optional fields (birth date) → dropped to `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use milsabores_core::validation::{
    validate_coupon_code, validate_email, validate_product_id, validate_product_name,
};
use milsabores_core::{
    CouponDefinition, CouponKind, CustomerDiscountProfile, Product, ValidationError,
};

// =============================================================================
// Raw Product
// =============================================================================

/// A product as the catalog endpoint returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub base_price_clp: Option<i64>,
    pub stock: Option<i64>,
    pub critical_stock: Option<i64>,
    pub description: Option<String>,
}

impl TryFrom<RawProduct> for Product {
    type Error = ValidationError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let id = raw.id.unwrap_or_default();
        validate_product_id(&id)?;

        let name = raw.name.unwrap_or_default();
        validate_product_name(&name)?;

        Ok(Product {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            category: raw.category.unwrap_or_default(),
            // Negative or missing money/stock means zero, never an error
            base_price_clp: raw.base_price_clp.unwrap_or(0).max(0),
            stock: raw.stock.unwrap_or(0).max(0),
            critical_stock: raw.critical_stock.filter(|t| *t >= 0),
            description: raw.description,
        })
    }
}

// =============================================================================
// Raw Profile
// =============================================================================

/// The discount-relevant profile slice as the session endpoint returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProfile {
    pub email: Option<String>,
    /// ISO 8601 date string ("1970-06-15").
    pub birth_date: Option<String>,
    pub promo_code: Option<String>,
    pub permanent_discount: Option<bool>,
    pub birthday_redeemed_year: Option<i32>,
}

impl TryFrom<RawProfile> for CustomerDiscountProfile {
    type Error = ValidationError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        let email = raw.email.unwrap_or_default();
        validate_email(&email)?;

        // An unparseable birth date disables the date-based benefits
        // rather than failing the whole profile
        let birth_date = raw
            .birth_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());

        Ok(CustomerDiscountProfile {
            email: email.trim().to_string(),
            birth_date,
            promo_code: raw.promo_code.filter(|c| !c.trim().is_empty()),
            permanent_discount: raw.permanent_discount.unwrap_or(false),
            birthday_redeemed_year: raw.birthday_redeemed_year,
        })
    }
}

// =============================================================================
// Raw Coupon
// =============================================================================

/// A coupon as the coupon-catalog endpoint returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCoupon {
    pub code: Option<String>,
    /// "flat_amount" or "free_shipping".
    pub kind: Option<String>,
    pub value_clp: Option<i64>,
    pub label: Option<String>,
}

impl TryFrom<RawCoupon> for CouponDefinition {
    type Error = ValidationError;

    fn try_from(raw: RawCoupon) -> Result<Self, Self::Error> {
        let code = raw.code.unwrap_or_default();
        validate_coupon_code(&code)?;
        let code = code.trim().to_uppercase();

        let kind = match raw.kind.as_deref().map(str::trim) {
            Some("flat_amount") => CouponKind::FlatAmount,
            Some("free_shipping") => CouponKind::FreeShipping,
            other => {
                return Err(ValidationError::InvalidFormat {
                    field: "kind".to_string(),
                    reason: format!("unknown coupon kind {:?}", other),
                })
            }
        };

        Ok(CouponDefinition {
            label: raw.label.filter(|l| !l.trim().is_empty()).unwrap_or_else(|| code.clone()),
            code,
            kind,
            value_clp: raw.value_clp.unwrap_or(0).max(0),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
