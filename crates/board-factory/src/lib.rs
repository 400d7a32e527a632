//! # Board Factory - Creation, Versioning, and Upgrades
//!
//! The trust anchor of the Ledgerboard system. This crate owns:
//!
//! - **ImplementationRegistry**: version number -> executable board
//!   behavior; one implementation per version, permanent, never null.
//! - **UpgradeController**: the per-board indirection that rebinds a
//!   board's behavior while its state survives verbatim.
//! - **BoardFactory**: creates boards bound to a registered version,
//!   seeds their initial roles, and gates upgrades behind its own
//!   Developer role.
//! - **FactoryService**: the async facade callers actually use. One
//!   exclusive lock per board serializes that board's mutations while
//!   distinct boards proceed concurrently; every committed mutation is
//!   published to the event bus.
//!
//! ## Trust Tiers
//!
//! | Operation | Required role |
//! |-----------|---------------|
//! | `register_implementation` | Developer on the factory |
//! | `create_board` | any non-zero caller |
//! | `upgrade_board` | Developer on the factory (delegated through the board's own Developer set) |
//! | board administration | Admin on the board |
//! | message append | Member on the board |

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod controller;
pub mod errors;
pub mod factory;
pub mod registry;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::controller::UpgradeController;
    pub use crate::errors::{FactoryError, RegistryError};
    pub use crate::factory::{BoardFactory, BoardHandle};
    pub use crate::registry::{ImplementationRef, ImplementationRegistry};
    pub use crate::service::{FactoryService, ServiceConfig, ServiceStats};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
