//! # Versioned Board Behavior
//!
//! The executable side of a board. A `BoardImplementation` is stateless
//! and `Send + Sync`; all persistent data lives in [`BoardState`]. The
//! upgrade controller swaps which implementation a board dispatches to,
//! and nothing else.
//!
//! The base operation surface is shared by every version and implemented
//! as default methods directly over the domain layer. Operations a
//! version does not support (comments, before V2) fail with
//! `UnsupportedOperation` instead of silently no-opping.

mod v1;
mod v2;

pub use v1::BoardV1;
pub use v2::BoardV2;

use crate::domain::board::{BoardState, Comment};
use crate::domain::ledger::Message;
use crate::errors::BoardError;
use board_types::{AccountId, Timestamp, Version};

/// Executable behavior bound to a board identity.
///
/// Implementations must be pure dispatchers: every method reads and
/// writes only through the `BoardState` it is handed, so that rebinding
/// a board to a different implementation preserves all accumulated state
/// verbatim.
pub trait BoardImplementation: Send + Sync + std::fmt::Debug {
    /// The version this implementation reports.
    fn version(&self) -> Version;

    // =========================================================================
    // LEDGER SURFACE
    // =========================================================================

    /// Appends a message; member-gated.
    fn add_message(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        content: &str,
        topic: &str,
        now: Timestamp,
    ) -> Result<u64, BoardError> {
        state.ledger.append(&state.roles, caller, content, topic, now)
    }

    /// Retrieves a previously assigned message.
    fn get_message(&self, state: &BoardState, id: u64) -> Result<Message, BoardError> {
        state.ledger.get(id).cloned()
    }

    /// The id the next successful append will receive.
    fn next_message_id(&self, state: &BoardState) -> u64 {
        state.ledger.next_id()
    }

    /// Retrieves the messages with ids in the half-open range `from..to`.
    fn get_messages_in_range(
        &self,
        state: &BoardState,
        from: u64,
        to: u64,
    ) -> Result<Vec<Message>, BoardError> {
        state.ledger.range(from, to)
    }

    // =========================================================================
    // MEMBERSHIP SURFACE
    // =========================================================================

    /// Grants membership; admin-gated, duplicate grants rejected.
    fn add_member(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        target: AccountId,
    ) -> Result<(), BoardError> {
        state.roles.grant_member(caller, target)
    }

    /// Grants membership in bulk; the whole batch applies or none of it.
    fn add_members(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        targets: &[AccountId],
    ) -> Result<(), BoardError> {
        state.roles.grant_members(caller, targets)
    }

    /// Revokes membership; admin-gated.
    fn remove_member(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        target: AccountId,
    ) -> Result<(), BoardError> {
        state.roles.revoke_member(caller, target)
    }

    // =========================================================================
    // ADMINISTRATION SURFACE
    // =========================================================================

    /// Grants the Admin role; idempotent. Returns whether the grant was new.
    fn add_admin(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        target: AccountId,
    ) -> Result<bool, BoardError> {
        state.roles.grant_admin(caller, target)
    }

    /// Revokes the Admin role; self-revocation and last-admin protected.
    fn remove_admin(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        target: AccountId,
    ) -> Result<(), BoardError> {
        state.roles.revoke_admin(caller, target)
    }

    /// Moves administration from the caller to `new_admin` atomically.
    fn transfer_admin(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        new_admin: AccountId,
    ) -> Result<(), BoardError> {
        state.roles.transfer_admin(caller, new_admin)
    }

    // =========================================================================
    // COMMENT SURFACE (V2+)
    // =========================================================================

    /// Attaches a comment to an existing message; member-gated.
    ///
    /// Unsupported before V2.
    fn add_comment(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        message_id: u64,
        content: &str,
        now: Timestamp,
    ) -> Result<u64, BoardError> {
        let _ = (state, caller, message_id, content, now);
        Err(BoardError::UnsupportedOperation {
            operation: "add_comment",
            version: self.version(),
        })
    }

    /// Reads a comment by message id and position.
    ///
    /// Unsupported before V2.
    fn get_comment(
        &self,
        state: &BoardState,
        message_id: u64,
        index: u64,
    ) -> Result<Comment, BoardError> {
        let _ = (state, message_id, index);
        Err(BoardError::UnsupportedOperation {
            operation: "get_comment",
            version: self.version(),
        })
    }

    /// Number of comments on a message.
    ///
    /// Unsupported before V2.
    fn comment_count(&self, state: &BoardState, message_id: u64) -> Result<u64, BoardError> {
        let _ = (state, message_id);
        Err(BoardError::UnsupportedOperation {
            operation: "comment_count",
            version: self.version(),
        })
    }
}
