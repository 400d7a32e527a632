//! # Upgrade Controller
//!
//! Per-board indirection between a stable board identity and whichever
//! implementation version currently backs it. The binding is the only
//! thing an upgrade rewrites; `BoardState` is never touched.
//!
//! State machine: `Bound(v) -> Bound(v')` on a successful upgrade.
//! There are no other states, and a failed resolution leaves the prior
//! binding fully intact.

use crate::errors::FactoryError;
use crate::registry::{ImplementationRef, ImplementationRegistry};
use board_core::domain::roles::RoleStore;
use board_types::{AccountId, Version};

/// The dispatch binding of one board.
#[derive(Debug)]
pub struct UpgradeController {
    version: Version,
    implementation: ImplementationRef,
}

impl UpgradeController {
    /// Binds a freshly created board to its initial version.
    #[must_use]
    pub fn new(version: Version, implementation: ImplementationRef) -> Self {
        Self {
            version,
            implementation,
        }
    }

    /// The currently bound version.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// The currently bound behavior; all board operations dispatch
    /// through this.
    #[must_use]
    pub fn implementation(&self) -> &ImplementationRef {
        &self.implementation
    }

    /// Rebinds the board to `new_version`.
    ///
    /// The caller must hold the Developer role **on this board**. The new
    /// version is resolved through the registry first; any failure leaves
    /// the current binding untouched. Returns the previously bound
    /// version.
    pub fn upgrade(
        &mut self,
        caller: AccountId,
        roles: &RoleStore,
        new_version: Version,
        registry: &ImplementationRegistry,
    ) -> Result<Version, FactoryError> {
        roles.require_developer(caller)?;
        let implementation = registry.resolve(new_version)?;

        let old_version = self.version;
        self.version = new_version;
        self.implementation = implementation;
        Ok(old_version)
    }
}

// =============================================================================
// TESTS
// =============================================================================
