//! # Message Ledger
//!
//! Append-only sequence of fixed-shape records keyed by a monotonically
//! increasing identifier. Ids start at 1 and are assigned in strict call
//! order; a failed append never advances the counter.
//!
//! The ledger depends on [`RoleStore`] only to validate who may append.

use crate::domain::roles::RoleStore;
use crate::errors::BoardError;
use board_types::{AccountId, Payload, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable ledger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Monotonic identifier, assigned at append time, starting at 1.
    pub id: u64,
    /// The caller's identity at append time.
    pub sender: AccountId,
    /// Message content in the fixed 31-byte encoding.
    pub content: Payload,
    /// Message topic in the fixed 31-byte encoding.
    pub topic: Payload,
    /// Wall-clock time of append; strictly positive.
    pub timestamp: Timestamp,
}

/// The append-only message ledger of one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLedger {
    messages: BTreeMap<u64, Message>,
    next_id: u64,
}

impl MessageLedger {
    /// Creates an empty ledger. The first assigned id will be 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Appends a message and returns its assigned id.
    ///
    /// Validation order: membership, then payload bounds. All checks run
    /// before any mutation, so a rejected append leaves `next_id` and the
    /// stored records untouched.
    pub fn append(
        &mut self,
        roles: &RoleStore,
        sender: AccountId,
        content: &str,
        topic: &str,
        now: Timestamp,
    ) -> Result<u64, BoardError> {
        roles.require_member(sender)?;
        let content = Payload::parse(content)?;
        let topic = Payload::parse(topic)?;

        let id = self.next_id;
        self.messages.insert(
            id,
            Message {
                id,
                sender,
                content,
                topic,
                timestamp: now,
            },
        );
        self.next_id += 1;
        Ok(id)
    }

    /// Looks up a previously assigned message.
    ///
    /// Fails with `InvalidId` for id 0 and for any id not yet assigned.
    pub fn get(&self, id: u64) -> Result<&Message, BoardError> {
        if id == 0 || id >= self.next_id {
            return Err(BoardError::InvalidId {
                id,
                next: self.next_id,
            });
        }
        self.messages.get(&id).ok_or(BoardError::InvalidId {
            id,
            next: self.next_id,
        })
    }

    /// Returns the messages with ids in the half-open range `from..to`.
    ///
    /// Both bounds must lie inside the assigned range: `from` must name an
    /// assigned id and `to` may be at most `next_id`. An empty range
    /// (`from >= to`) yields an empty vector.
    pub fn range(&self, from: u64, to: u64) -> Result<Vec<Message>, BoardError> {
        if from == 0 || from >= self.next_id {
            return Err(BoardError::InvalidId {
                id: from,
                next: self.next_id,
            });
        }
        if to > self.next_id {
            return Err(BoardError::InvalidId {
                id: to,
                next: self.next_id,
            });
        }
        Ok(self.messages.range(from..to).map(|(_, m)| m.clone()).collect())
    }

    /// The id the next successful append will receive.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no message has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates stored messages in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }
}

impl Default for MessageLedger {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
