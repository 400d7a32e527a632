//! # Error Types
//!
//! Registry and factory error taxonomies. Board-level failures bubble up
//! unchanged through `FactoryError::Board`.

use board_core::errors::BoardError;
use board_types::{AccountId, BoardId, ValueError, Version};
use thiserror::Error;

/// Errors from implementation-registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The version is already registered; registrations are permanent.
    #[error("version {0} is already registered")]
    VersionExists(Version),

    /// The null/absent implementation reference is never a legal value.
    #[error("implementation reference must not be null")]
    NullImplementation,

    /// No implementation is registered for the requested version.
    #[error("no implementation registered for {0}")]
    ImplementationNotFound(Version),
}

/// Errors from factory operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// Board name was empty.
    #[error("board name must not be empty")]
    EmptyName,

    /// Board name exceeded the maximum length.
    #[error("board name too long: {len} > {max} characters")]
    NameTooLong {
        /// Actual length in characters.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Caller lacks the factory Developer role.
    #[error("caller {caller} lacks the factory Developer role")]
    Unauthorized {
        /// The caller that was rejected.
        caller: AccountId,
    },

    /// No board exists under this identity.
    #[error("unknown board: {0}")]
    BoardNotFound(BoardId),

    /// A registry precondition was violated.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A board-level precondition was violated.
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl From<ValueError> for FactoryError {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::EmptyName => Self::EmptyName,
            ValueError::NameTooLong { len, max } => Self::NameTooLong { len, max },
            // Payload-sized errors never originate here, but the mapping
            // stays total.
            other => Self::Board(BoardError::ContentTooLarge(other)),
        }
    }
}
