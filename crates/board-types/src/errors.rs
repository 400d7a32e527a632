//! # Value Validation Errors
//!
//! Errors raised when constructing the size-bounded value objects.
//! Higher layers convert these into their own taxonomies (the ledger maps
//! `PayloadTooLarge` to `ContentTooLarge`, the factory maps the name
//! variants to its input-validation errors).

use thiserror::Error;

/// Errors from value-object construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
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

    /// Payload exceeded the fixed encodable size.
    #[error("payload too large: {len} > {max} bytes")]
    PayloadTooLarge {
        /// Actual length in bytes.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Version number zero is not a legal version.
    #[error("version must be a positive integer")]
    ZeroVersion,
}
