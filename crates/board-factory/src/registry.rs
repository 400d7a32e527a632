//! # Implementation Registry
//!
//! Maps a version number to an executable board implementation. One
//! implementation per version, set once and never overwritten; the
//! null/absent reference is never a legal value. There is no unregister
//! operation.
//!
//! Caller authorization is enforced by the factory surface before
//! delegation; the registry itself is a pure map with guards.

use crate::errors::RegistryError;
use board_core::behavior::BoardImplementation;
use board_types::Version;
use std::collections::HashMap;
use std::sync::Arc;

/// A shared, immutable reference to registered board behavior.
pub type ImplementationRef = Arc<dyn BoardImplementation>;

/// The process-wide version -> implementation map.
///
/// Created once, mutated only through [`ImplementationRegistry::register`],
/// never reset.
#[derive(Default)]
pub struct ImplementationRegistry {
    implementations: HashMap<Version, ImplementationRef>,
}

impl ImplementationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an implementation for `version`.
    ///
    /// `None` models the null reference and is rejected outright.
    /// Re-registering an existing version fails and leaves the original
    /// mapping unchanged.
    pub fn register(
        &mut self,
        version: Version,
        implementation: Option<ImplementationRef>,
    ) -> Result<(), RegistryError> {
        let implementation = implementation.ok_or(RegistryError::NullImplementation)?;
        if self.implementations.contains_key(&version) {
            return Err(RegistryError::VersionExists(version));
        }
        self.implementations.insert(version, implementation);
        Ok(())
    }

    /// Resolves a version to its registered implementation.
    pub fn resolve(&self, version: Version) -> Result<ImplementationRef, RegistryError> {
        self.implementations
            .get(&version)
            .cloned()
            .ok_or(RegistryError::ImplementationNotFound(version))
    }

    /// Returns true if `version` has a registered implementation.
    #[must_use]
    pub fn is_registered(&self, version: Version) -> bool {
        self.implementations.contains_key(&version)
    }

    /// Number of registered versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    /// Returns true if nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
