//! # Board Factory
//!
//! Creates boards bound to a registered implementation version, seeds
//! their initial roles, and gates upgrades. The factory holds no board
//! state beyond its bookkeeping: its own role store, the registry, and
//! the monotonic count of boards created.

use crate::controller::UpgradeController;
use crate::errors::FactoryError;
use crate::registry::{ImplementationRef, ImplementationRegistry};
use board_core::domain::board::{BoardState, Comment};
use board_core::domain::ledger::Message;
use board_core::domain::roles::RoleStore;
use board_core::errors::BoardError;
use board_types::{AccountId, BoardId, BoardName, Timestamp, Version};

// =============================================================================
// BOARD HANDLE
// =============================================================================

/// One board: persistent state plus its current dispatch binding.
///
/// All operations go through the bound implementation so that an upgrade
/// changes behavior for every subsequent call without touching state.
#[derive(Debug)]
pub struct BoardHandle {
    /// Persistent board state (survives upgrades verbatim).
    pub state: BoardState,
    /// Current version binding.
    pub controller: UpgradeController,
}

impl BoardHandle {
    /// The currently bound implementation version.
    #[must_use]
    pub fn version(&self) -> Version {
        self.controller.version()
    }

    /// Appends a message through the bound behavior.
    pub fn add_message(
        &mut self,
        caller: AccountId,
        content: &str,
        topic: &str,
        now: Timestamp,
    ) -> Result<u64, BoardError> {
        self.controller
            .implementation()
            .add_message(&mut self.state, caller, content, topic, now)
    }

    /// Reads a message through the bound behavior.
    pub fn get_message(&self, id: u64) -> Result<Message, BoardError> {
        self.controller.implementation().get_message(&self.state, id)
    }

    /// The id the next successful append will receive.
    #[must_use]
    pub fn next_message_id(&self) -> u64 {
        self.controller.implementation().next_message_id(&self.state)
    }

    /// Reads the messages with ids in the half-open range `from..to`.
    pub fn get_messages_in_range(&self, from: u64, to: u64) -> Result<Vec<Message>, BoardError> {
        self.controller
            .implementation()
            .get_messages_in_range(&self.state, from, to)
    }

    /// Grants membership.
    pub fn add_member(&mut self, caller: AccountId, target: AccountId) -> Result<(), BoardError> {
        self.controller
            .implementation()
            .add_member(&mut self.state, caller, target)
    }

    /// Grants membership in bulk (all-or-nothing).
    pub fn add_members(
        &mut self,
        caller: AccountId,
        targets: &[AccountId],
    ) -> Result<(), BoardError> {
        self.controller
            .implementation()
            .add_members(&mut self.state, caller, targets)
    }

    /// Revokes membership.
    pub fn remove_member(
        &mut self,
        caller: AccountId,
        target: AccountId,
    ) -> Result<(), BoardError> {
        self.controller
            .implementation()
            .remove_member(&mut self.state, caller, target)
    }

    /// Grants the Admin role; returns whether the grant was new.
    pub fn add_admin(&mut self, caller: AccountId, target: AccountId) -> Result<bool, BoardError> {
        self.controller
            .implementation()
            .add_admin(&mut self.state, caller, target)
    }

    /// Revokes the Admin role.
    pub fn remove_admin(
        &mut self,
        caller: AccountId,
        target: AccountId,
    ) -> Result<(), BoardError> {
        self.controller
            .implementation()
            .remove_admin(&mut self.state, caller, target)
    }

    /// Moves administration from the caller to `new_admin`.
    pub fn transfer_admin(
        &mut self,
        caller: AccountId,
        new_admin: AccountId,
    ) -> Result<(), BoardError> {
        self.controller
            .implementation()
            .transfer_admin(&mut self.state, caller, new_admin)
    }

    /// Attaches a comment to an existing message (V2+).
    pub fn add_comment(
        &mut self,
        caller: AccountId,
        message_id: u64,
        content: &str,
        now: Timestamp,
    ) -> Result<u64, BoardError> {
        self.controller
            .implementation()
            .add_comment(&mut self.state, caller, message_id, content, now)
    }

    /// Reads a comment by message id and position (V2+).
    pub fn get_comment(&self, message_id: u64, index: u64) -> Result<Comment, BoardError> {
        self.controller
            .implementation()
            .get_comment(&self.state, message_id, index)
    }

    /// Number of comments on a message (V2+).
    pub fn comment_count(&self, message_id: u64) -> Result<u64, BoardError> {
        self.controller
            .implementation()
            .comment_count(&self.state, message_id)
    }
}

// =============================================================================
// FACTORY
// =============================================================================

/// Factory bookkeeping: its own roles, the registry, and the board count.
///
/// Process-wide state with an explicit lifecycle: created once, mutated
/// only through the defined operations, never implicitly reset.
pub struct BoardFactory {
    identity: AccountId,
    roles: RoleStore,
    registry: ImplementationRegistry,
    board_count: u64,
}

impl BoardFactory {
    /// Creates a factory.
    ///
    /// `identity` is the factory's own identity (seeded as Developer on
    /// every board it creates); `owner` becomes the factory's initial
    /// Admin and Developer. Both must be non-zero.
    pub fn new(identity: AccountId, owner: AccountId) -> Result<Self, FactoryError> {
        if identity.is_zero() {
            return Err(BoardError::NullAddress.into());
        }
        Ok(Self {
            identity,
            roles: RoleStore::new(owner, identity)?,
            registry: ImplementationRegistry::new(),
            board_count: 0,
        })
    }

    /// The factory's own identity.
    #[must_use]
    pub fn identity(&self) -> AccountId {
        self.identity
    }

    /// The factory's role store (read-only).
    #[must_use]
    pub fn roles(&self) -> &RoleStore {
        &self.roles
    }

    /// The implementation registry (read-only).
    #[must_use]
    pub fn registry(&self) -> &ImplementationRegistry {
        &self.registry
    }

    /// Monotonic count of boards created through this factory.
    #[must_use]
    pub fn board_count(&self) -> u64 {
        self.board_count
    }

    /// Registers an implementation; factory-Developer gated.
    pub fn register_implementation(
        &mut self,
        caller: AccountId,
        version: Version,
        implementation: Option<ImplementationRef>,
    ) -> Result<(), FactoryError> {
        self.require_developer(caller)?;
        self.registry.register(version, implementation)?;
        Ok(())
    }

    /// Resolves a version to its registered implementation.
    pub fn resolve_implementation(
        &self,
        version: Version,
    ) -> Result<ImplementationRef, FactoryError> {
        Ok(self.registry.resolve(version)?)
    }

    /// Creates a new board bound to `version`.
    ///
    /// Validation order: caller non-zero, name bounds, version resolution,
    /// then role seeding. `caller` becomes the initial Admin and Developer
    /// and the factory identity a board Developer; every account in
    /// `initial_authorized` becomes a Member through the same atomic bulk
    /// path as `add_members` (duplicates are an error).
    pub fn create_board(
        &mut self,
        caller: AccountId,
        version: Version,
        name: &str,
        initial_authorized: &[AccountId],
    ) -> Result<BoardHandle, FactoryError> {
        if caller.is_zero() {
            return Err(BoardError::NullAddress.into());
        }
        let name = BoardName::parse(name)?;
        let implementation = self.registry.resolve(version)?;

        let id = BoardId::generate();
        let mut state = BoardState::new(id, name, caller, self.identity)?;
        if !initial_authorized.is_empty() {
            state.roles.grant_members(caller, initial_authorized)?;
        }

        self.board_count += 1;
        Ok(BoardHandle {
            state,
            controller: UpgradeController::new(version, implementation),
        })
    }

    /// Fails unless `caller` holds the factory Developer role.
    pub fn require_developer(&self, caller: AccountId) -> Result<(), FactoryError> {
        if self.roles.is_developer(caller) {
            Ok(())
        } else {
            Err(FactoryError::Unauthorized { caller })
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
