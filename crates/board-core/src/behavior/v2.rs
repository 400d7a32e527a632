//! # Board Behavior, Version 2
//!
//! Everything V1 does, plus append-only comments on existing messages.
//! Comments are member-gated, bounded by the same 31-byte payload
//! encoding, and immutable once added.

use crate::behavior::BoardImplementation;
use crate::domain::board::{BoardState, Comment};
use crate::errors::BoardError;
use board_types::{AccountId, Payload, Timestamp, Version};

/// The upgraded board implementation with comment support.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardV2;

impl BoardImplementation for BoardV2 {
    fn version(&self) -> Version {
        Version::new(2)
    }

    fn add_comment(
        &self,
        state: &mut BoardState,
        caller: AccountId,
        message_id: u64,
        content: &str,
        now: Timestamp,
    ) -> Result<u64, BoardError> {
        state.roles.require_member(caller)?;
        // Validates the id range; comments only anchor to assigned messages.
        state.ledger.get(message_id)?;
        let content = Payload::parse(content)?;

        let list = state.comments.entry(message_id).or_default();
        list.push(Comment {
            author: caller,
            content,
            timestamp: now,
        });
        Ok(list.len() as u64 - 1)
    }

    fn get_comment(
        &self,
        state: &BoardState,
        message_id: u64,
        index: u64,
    ) -> Result<Comment, BoardError> {
        state.ledger.get(message_id)?;
        let list = state.comments.get(&message_id);
        let count = list.map_or(0, |l| l.len() as u64);
        // Comment positions reuse the InvalidId taxonomy: `next` is the
        // first unassigned index.
        list.and_then(|l| l.get(usize::try_from(index).ok()?))
            .cloned()
            .ok_or(BoardError::InvalidId {
                id: index,
                next: count,
            })
    }

    fn comment_count(&self, state: &BoardState, message_id: u64) -> Result<u64, BoardError> {
        state.ledger.get(message_id)?;
        Ok(state.comment_count(message_id))
    }
}

// =============================================================================
// TESTS
// =============================================================================
