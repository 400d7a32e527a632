//! # Board Core - Roles, Ledger, and Versioned Behavior
//!
//! The domain heart of the Ledgerboard system: a permissioned, append-only
//! message ledger with tiered role-based access control and behavior that
//! can be swapped without touching state.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Admin set is never empty once initialized | `domain/roles.rs` - `revoke_admin`, `transfer_admin` |
//! | No admin self-revocation | `domain/roles.rs` - `revoke_admin` (checked before the count) |
//! | Message ids start at 1, strictly increasing, gap-free | `domain/ledger.rs` - `append` |
//! | Oversized payloads rejected before any mutation | `domain/ledger.rs` - `append` |
//! | Messages and comments immutable once written | no mutating accessors exist |
//! | Upgrades never touch `BoardState` | `behavior/` operates through `&mut BoardState` only |
//!
//! ## Separation of Identity and Behavior
//!
//! `BoardState` carries everything that must survive an upgrade (roles,
//! ledger, comments). `BoardImplementation` is stateless and dispatches
//! over a `BoardState`; rebinding a board to a newer implementation only
//! swaps the trait object, never the state.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod behavior;
pub mod domain;
pub mod errors;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::behavior::{BoardImplementation, BoardV1, BoardV2};
    pub use crate::domain::board::{BoardState, Comment};
    pub use crate::domain::invariants::{check_all_invariants, InvariantViolation};
    pub use crate::domain::ledger::{Message, MessageLedger};
    pub use crate::domain::roles::{RoleKind, RoleStore, MAX_BATCH_SIZE};
    pub use crate::errors::BoardError;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
