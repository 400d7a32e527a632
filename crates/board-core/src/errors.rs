//! # Error Types
//!
//! All error types for board operations. Every error is a local validation
//! failure detected before any mutation: operations are validate-then-apply
//! and leave no partial state behind.

use crate::domain::roles::RoleKind;
use board_types::{AccountId, ValueError, Version};
use thiserror::Error;

/// Errors that can occur during board operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Caller lacks the required role for the operation.
    #[error("caller {caller} lacks required role {required:?}")]
    Unauthorized {
        /// The caller that was rejected.
        caller: AccountId,
        /// The role the operation requires.
        required: RoleKind,
    },

    /// Target is already a member (membership grants are not idempotent).
    #[error("account {0} is already a member")]
    AlreadyMember(AccountId),

    /// Target is not a member.
    #[error("account {0} is not a member")]
    NotAMember(AccountId),

    /// An admin tried to revoke their own admin role.
    #[error("an admin cannot revoke their own role")]
    SelfRevocation,

    /// Removing the target would leave the board without admins.
    #[error("cannot remove the last remaining admin")]
    LastAdmin,

    /// The zero identity is not a legal target.
    #[error("the zero identity is not a valid target")]
    NullAddress,

    /// Ledger payload exceeds the fixed encodable size.
    #[error("content exceeds fixed encodable size: {0}")]
    ContentTooLarge(#[from] ValueError),

    /// Ledger lookup outside the assigned id range.
    #[error("invalid message id {id} (assigned range is 1..{next})")]
    InvalidId {
        /// The requested id.
        id: u64,
        /// The next id to be assigned (exclusive upper bound).
        next: u64,
    },

    /// Bulk-operation bound exceeded.
    #[error("batch too large: {len} > {max} accounts per call")]
    BatchTooLarge {
        /// Actual batch size.
        len: usize,
        /// Maximum batch size per call.
        max: usize,
    },

    /// Bulk operation called with an empty list.
    #[error("member batch must not be empty")]
    EmptyBatch,

    /// The bound implementation version does not support this operation.
    #[error("operation '{operation}' is not supported by implementation {version}")]
    UnsupportedOperation {
        /// The unsupported operation name.
        operation: &'static str,
        /// The version that rejected it.
        version: Version,
    },
}
