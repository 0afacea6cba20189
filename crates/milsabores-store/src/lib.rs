//! # milsabores-store: Session State for the Mil Sabores Storefront
//!
//! The stateful shell between the React frontend and the pure pricing core.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where This Crate Sits                                │
//! │                                                                         │
//! │  Frontend (React) ──► milsabores-store ──► milsabores-core             │
//! │                           │    ▲                                        │
//! │                           ▼    │ validated types                        │
//! │                   CommerceBackend trait                                 │
//! │                   (HTTP client in the host app)                         │
//! │                                                                         │
//! │  • state:   SessionState + StoreState (Arc<Mutex>)                     │
//! │  • backend: collaborator trait, refresh & order submission             │
//! │  • dto:     loose backend payloads → strong core types                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All pricing is recomputed fresh from authoritative inputs on every call
//! to [`state::SessionState::quote`]; nothing here caches derived totals.

pub mod backend;
pub mod dto;
pub mod error;
pub mod state;

pub use backend::{CommerceBackend, OrderConfirmation};
pub use error::{BackendError, StoreError};
pub use state::{SessionState, StoreState};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// Called once by the host application at startup.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=milsabores=trace` - Trace the milsabores crates only
/// - Default: INFO level, debug for the milsabores crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,milsabores=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
