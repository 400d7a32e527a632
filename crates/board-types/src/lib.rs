//! # Board Types - Shared Identities and Value Objects
//!
//! Leaf crate holding the types every other Ledgerboard crate agrees on:
//! opaque caller identities, stable board handles, implementation versions,
//! timestamps, and the size-bounded string values (`BoardName`, `Payload`)
//! whose validation rules are the system's input contract.
//!
//! ## Design Rules
//!
//! - Identities are opaque and comparable; no role logic lives in them.
//! - Value objects validate at construction and are immutable afterwards.
//! - Oversized input is rejected, never truncated.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod errors;
pub mod identity;
pub mod values;

pub use errors::ValueError;
pub use identity::{AccountId, BoardId};
pub use values::{BoardName, Payload, Timestamp, Version};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
