//! # Board State
//!
//! Everything that must survive an upgrade lives here: the board's
//! identity and name, its role sets, its message ledger, and the comment
//! lists introduced by the V2 behavior. `BoardState` is created once at
//! board initialization and persists for the board's entire lifetime;
//! rebinding an implementation never touches it.

use crate::domain::ledger::MessageLedger;
use crate::domain::roles::RoleStore;
use crate::errors::BoardError;
use board_types::{AccountId, BoardId, BoardName, Payload, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable comment attached to a message (V2 behavior).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Who wrote the comment.
    pub author: AccountId,
    /// Comment content in the fixed 31-byte encoding.
    pub content: Payload,
    /// When the comment was added.
    pub timestamp: Timestamp,
}

/// The persistent state of one board.
///
/// Fields occupy a stable logical location independent of which
/// implementation version is currently bound; this is the precondition
/// for upgrade safety.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Stable external handle.
    pub id: BoardId,
    /// Validated board name.
    pub name: BoardName,
    /// Role assignments.
    pub roles: RoleStore,
    /// Append-only message ledger.
    pub ledger: MessageLedger,
    /// Append-only comment lists keyed by message id (used from V2 on;
    /// present in the state layout from day one so upgrades need no
    /// migration).
    pub comments: BTreeMap<u64, Vec<Comment>>,
}

impl BoardState {
    /// Initializes board state for a freshly created board.
    ///
    /// `creator` becomes the initial Admin and Developer; `factory` is
    /// registered as a Developer. Initial members are granted by the
    /// factory afterwards, through the same path as any bulk grant.
    pub fn new(
        id: BoardId,
        name: BoardName,
        creator: AccountId,
        factory: AccountId,
    ) -> Result<Self, BoardError> {
        Ok(Self {
            id,
            name,
            roles: RoleStore::new(creator, factory)?,
            ledger: MessageLedger::new(),
            comments: BTreeMap::new(),
        })
    }

    /// Total number of comments on a message (0 for uncommented ids).
    #[must_use]
    pub fn comment_count(&self, message_id: u64) -> u64 {
        self.comments
            .get(&message_id)
            .map_or(0, |list| list.len() as u64)
    }
}

// =============================================================================
// TESTS
// =============================================================================
