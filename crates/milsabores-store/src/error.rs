//! # Store Error Types
//!
//! Session-level and backend-boundary errors.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   ValidationError ─► CoreError ──┐                                      │
//! │                                  ├──► StoreError ──► host app / UI     │
//! │   BackendError (transport) ──────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use milsabores_core::CoreError;
use thiserror::Error;

// =============================================================================
// Backend Error
// =============================================================================

/// Failures crossing the backend collaborator boundary.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network/transport failure, message from the host's HTTP client.
    #[error("transport error: {0}")]
    Transport(String),

    /// The session token expired and could not be refreshed.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend answered with a payload we could not accept.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule was violated (wraps CoreError).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backend collaborator failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Checkout attempted with nothing priceable in the cart.
    #[error("cart is empty")]
    EmptyCart,
}

// =============================================================================
// Unit Tests
// =============================================================================
