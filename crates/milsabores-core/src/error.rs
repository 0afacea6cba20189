//! # Error Types
//!
//! Domain-specific error types for milsabores-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  milsabores-core errors (this file)                                    │
//! │  ├── CoreError        - Cart mutation guards                           │
//! │  └── ValidationError  - Input/boundary validation failures             │
//! │                                                                         │
//! │  milsabores-store errors (separate crate)                              │
//! │  ├── BackendError     - Collaborator/transport failures                │
//! │  └── StoreError       - Session-level failures                         │
//! │                                                                         │
//! │  NOTE: the pricing functions themselves are TOTAL; they clamp and      │
//! │  default instead of erroring. These types guard mutations (add to     │
//! │  cart) and the backend data boundary, never the pricing math.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, limits, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart-mutation and domain errors.
///
/// These represent business rule violations the UI must message; they are
/// returned by session operations, never by the pricing pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the current catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but has no sellable stock.
    ///
    /// ## When This Occurs
    /// - Adding an out-of-stock product to the cart
    /// - Adding a second birthday cake (effective availability is 1)
    #[error("No stock for {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// No cart line matches the given `(product_id, message)` key.
    #[error("No cart line for product {product_id}")]
    LineNotFound { product_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the data boundary, before values reach the pricing core.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
