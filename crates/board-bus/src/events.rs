//! # Board Events
//!
//! Defines all event types that flow through the bus. Each event carries
//! the acting identity, the affected identity/value, and a timestamp.

use board_types::{AccountId, BoardId, Timestamp, Version};
use serde::{Deserialize, Serialize};

/// All events that can be published to the bus.
///
/// One variant per observable side effect in the system. Events are
/// emitted only after the corresponding mutation has committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BoardEvent {
    // =========================================================================
    // REGISTRY
    // =========================================================================
    /// A new implementation version was registered.
    ImplementationRegistered {
        /// Who registered it.
        registrar: AccountId,
        /// The registered version.
        version: Version,
        /// When it was registered.
        timestamp: Timestamp,
    },

    // =========================================================================
    // FACTORY
    // =========================================================================
    /// A new board was created and bound to an implementation version.
    BoardCreated {
        /// The stable handle of the new board.
        board: BoardId,
        /// The board's name.
        name: String,
        /// Who created it (becomes initial Admin + Developer).
        creator: AccountId,
        /// The implementation version it was bound to.
        version: Version,
        /// When it was created.
        timestamp: Timestamp,
    },

    // =========================================================================
    // LEDGER
    // =========================================================================
    /// A message was appended to a board's ledger.
    MessageAdded {
        /// The board the message belongs to.
        board: BoardId,
        /// The assigned monotonic message id.
        id: u64,
        /// Who appended it.
        sender: AccountId,
        /// Message content.
        content: String,
        /// Message topic.
        topic: String,
        /// When it was appended.
        timestamp: Timestamp,
    },

    /// A comment was attached to an existing message (V2 behavior).
    CommentAdded {
        /// The board the message belongs to.
        board: BoardId,
        /// The commented message id.
        message_id: u64,
        /// Position of the comment in the message's comment list.
        index: u64,
        /// Who commented.
        author: AccountId,
        /// Comment content.
        content: String,
        /// When it was added.
        timestamp: Timestamp,
    },

    // =========================================================================
    // MEMBERSHIP
    // =========================================================================
    /// A member was granted on a board.
    MemberAdded {
        /// The affected board.
        board: BoardId,
        /// The admin who granted membership.
        admin: AccountId,
        /// The new member.
        member: AccountId,
        /// When.
        timestamp: Timestamp,
    },

    /// A member was revoked from a board.
    MemberRemoved {
        /// The affected board.
        board: BoardId,
        /// The admin who revoked membership.
        admin: AccountId,
        /// The removed member.
        member: AccountId,
        /// When.
        timestamp: Timestamp,
    },

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================
    /// An admin was granted on a board.
    AdminGranted {
        /// The affected board.
        board: BoardId,
        /// The admin who granted the role.
        granter: AccountId,
        /// The new admin.
        admin: AccountId,
        /// When.
        timestamp: Timestamp,
    },

    /// An admin was revoked from a board.
    AdminRevoked {
        /// The affected board.
        board: BoardId,
        /// The admin who revoked the role.
        revoker: AccountId,
        /// The removed admin.
        admin: AccountId,
        /// When.
        timestamp: Timestamp,
    },

    /// Board administration moved from one identity to another atomically.
    AdminTransferred {
        /// The affected board.
        board: BoardId,
        /// The previous admin (the caller).
        previous: AccountId,
        /// The new admin.
        new_admin: AccountId,
        /// When.
        timestamp: Timestamp,
    },

    // =========================================================================
    // UPGRADES
    // =========================================================================
    /// A board's bound implementation version changed.
    BoardUpgraded {
        /// The affected board.
        board: BoardId,
        /// The developer who approved the upgrade.
        developer: AccountId,
        /// Version the board was bound to before.
        old_version: Version,
        /// Version the board is bound to now.
        new_version: Version,
        /// When.
        timestamp: Timestamp,
    },
}

impl BoardEvent {
    /// Returns the topic this event belongs to.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ImplementationRegistered { .. } => EventTopic::Registry,
            Self::BoardCreated { .. } => EventTopic::Factory,
            Self::MessageAdded { .. } | Self::CommentAdded { .. } => EventTopic::Messages,
            Self::MemberAdded { .. } | Self::MemberRemoved { .. } => EventTopic::Membership,
            Self::AdminGranted { .. }
            | Self::AdminRevoked { .. }
            | Self::AdminTransferred { .. } => EventTopic::Administration,
            Self::BoardUpgraded { .. } => EventTopic::Upgrades,
        }
    }

    /// Returns the board this event concerns, if any.
    ///
    /// `ImplementationRegistered` is registry-wide and returns `None`.
    #[must_use]
    pub fn board(&self) -> Option<BoardId> {
        match self {
            Self::ImplementationRegistered { .. } => None,
            Self::BoardCreated { board, .. }
            | Self::MessageAdded { board, .. }
            | Self::CommentAdded { board, .. }
            | Self::MemberAdded { board, .. }
            | Self::MemberRemoved { board, .. }
            | Self::AdminGranted { board, .. }
            | Self::AdminRevoked { board, .. }
            | Self::AdminTransferred { board, .. }
            | Self::BoardUpgraded { board, .. } => Some(*board),
        }
    }
}

// =============================================================================
// TOPICS & FILTERS
// =============================================================================

/// Coarse event categories for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Implementation registrations.
    Registry,
    /// Board creations.
    Factory,
    /// Message and comment appends.
    Messages,
    /// Member grants and revocations.
    Membership,
    /// Admin grants, revocations, and transfers.
    Administration,
    /// Implementation rebinds.
    Upgrades,
}

/// Filter describing which events a subscriber wants.
///
/// An empty topic list means "everything". An optional board filter
/// narrows to a single board's events (registry-wide events never match
/// a board filter).
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to match; empty matches all topics.
    pub topics: Vec<EventTopic>,
    /// Board to match; `None` matches all boards.
    pub board: Option<BoardId>,
}

impl EventFilter {
    /// Matches every event.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches only the given topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            board: None,
        }
    }

    /// Matches only events concerning the given board.
    #[must_use]
    pub fn board(board: BoardId) -> Self {
        Self {
            topics: Vec::new(),
            board: Some(board),
        }
    }

    /// Returns true if the event passes this filter.
    #[must_use]
    pub fn matches(&self, event: &BoardEvent) -> bool {
        if !self.topics.is_empty() && !self.topics.contains(&event.topic()) {
            return false;
        }
        match self.board {
            None => true,
            Some(board) => event.board() == Some(board),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
