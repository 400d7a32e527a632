//! # Factory Service
//!
//! The async facade callers actually use. Owns the factory bookkeeping,
//! the map of live boards, and the event bus handle. One exclusive lock
//! per board serializes that board's mutations while distinct boards
//! proceed concurrently; the factory lock is always taken before any
//! board lock.
//!
//! Events are published only after the corresponding mutation has
//! committed, so a subscriber never observes an effect that was rolled
//! back.

use crate::errors::FactoryError;
use crate::factory::{BoardFactory, BoardHandle};
use crate::registry::ImplementationRef;
use board_bus::events::BoardEvent;
use board_bus::publisher::EventPublisher;
use board_core::domain::board::Comment;
use board_core::domain::ledger::Message;
use board_types::{AccountId, BoardId, Timestamp, Version};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Service configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Deduplicate the initial member list of `create_board` instead of
    /// rejecting duplicates.
    pub dedup_initial_members: bool,
}

/// Service statistics.
#[derive(Debug, Clone, Default)]
pub struct ServiceStats {
    /// Boards created through this service.
    pub boards_created: u64,
    /// Messages appended across all boards.
    pub messages_appended: u64,
    /// Implementation versions registered.
    pub implementations_registered: u64,
    /// Upgrades applied across all boards.
    pub upgrades_applied: u64,
    /// Operations rejected by a precondition.
    pub rejected_operations: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// Async facade over the factory and its live boards.
pub struct FactoryService {
    factory: Arc<RwLock<BoardFactory>>,
    boards: Arc<RwLock<HashMap<BoardId, Arc<RwLock<BoardHandle>>>>>,
    bus: Arc<dyn EventPublisher>,
    config: ServiceConfig,
    stats: Arc<RwLock<ServiceStats>>,
}

impl FactoryService {
    /// Creates a service around a fresh factory.
    ///
    /// `identity` is the factory's own identity, `owner` its initial
    /// Admin/Developer.
    pub fn new(
        identity: AccountId,
        owner: AccountId,
        bus: Arc<dyn EventPublisher>,
    ) -> Result<Self, FactoryError> {
        Self::with_config(identity, owner, bus, ServiceConfig::default())
    }

    /// Creates a service with explicit configuration.
    pub fn with_config(
        identity: AccountId,
        owner: AccountId,
        bus: Arc<dyn EventPublisher>,
        config: ServiceConfig,
    ) -> Result<Self, FactoryError> {
        let factory = BoardFactory::new(identity, owner)?;
        info!(factory = %identity, owner = %owner, "Factory service started");
        Ok(Self {
            factory: Arc::new(RwLock::new(factory)),
            boards: Arc::new(RwLock::new(HashMap::new())),
            bus,
            config,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        })
    }

    /// Returns a snapshot of the service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    async fn reject(&self) {
        self.stats.write().await.rejected_operations += 1;
    }

    async fn board(&self, board: BoardId) -> Result<Arc<RwLock<BoardHandle>>, FactoryError> {
        let handle = self.boards.read().await.get(&board).cloned();
        match handle {
            Some(handle) => Ok(handle),
            None => {
                self.reject().await;
                Err(FactoryError::BoardNotFound(board))
            }
        }
    }

    // =========================================================================
    // REGISTRY & FACTORY OPERATIONS
    // =========================================================================

    /// Registers an implementation version; factory-Developer gated.
    #[instrument(skip(self, implementation), fields(version = %version))]
    pub async fn register_implementation(
        &self,
        caller: AccountId,
        version: Version,
        implementation: Option<ImplementationRef>,
    ) -> Result<(), FactoryError> {
        let result = {
            let mut factory = self.factory.write().await;
            factory.register_implementation(caller, version, implementation)
        };
        match result {
            Ok(()) => {
                self.stats.write().await.implementations_registered += 1;
                info!(registrar = %caller, "Implementation registered");
                self.bus
                    .publish(BoardEvent::ImplementationRegistered {
                        registrar: caller,
                        version,
                        timestamp: Timestamp::now(),
                    })
                    .await;
                Ok(())
            }
            Err(e) => {
                warn!(registrar = %caller, error = %e, "Registration rejected");
                self.reject().await;
                Err(e)
            }
        }
    }

    /// Returns true if `version` has a registered implementation.
    pub async fn is_version_registered(&self, version: Version) -> bool {
        self.factory.read().await.registry().is_registered(version)
    }

    /// Creates a board bound to `version` and returns its identity.
    #[instrument(skip(self, initial_authorized), fields(version = %version, name = name))]
    pub async fn create_board(
        &self,
        caller: AccountId,
        version: Version,
        name: &str,
        initial_authorized: &[AccountId],
    ) -> Result<BoardId, FactoryError> {
        let members: Vec<AccountId> = if self.config.dedup_initial_members {
            let mut seen = Vec::with_capacity(initial_authorized.len());
            for &account in initial_authorized {
                if !seen.contains(&account) {
                    seen.push(account);
                }
            }
            seen
        } else {
            initial_authorized.to_vec()
        };

        let now = Timestamp::now();
        let handle = {
            let mut factory = self.factory.write().await;
            match factory.create_board(caller, version, name, &members) {
                Ok(handle) => handle,
                Err(e) => {
                    warn!(creator = %caller, error = %e, "Board creation rejected");
                    self.reject().await;
                    return Err(e);
                }
            }
        };

        let board = handle.state.id;
        let board_name = handle.state.name.as_str().to_string();
        self.boards
            .write()
            .await
            .insert(board, Arc::new(RwLock::new(handle)));
        self.stats.write().await.boards_created += 1;
        info!(board = %board, creator = %caller, "Board created");

        self.bus
            .publish(BoardEvent::BoardCreated {
                board,
                name: board_name,
                creator: caller,
                version,
                timestamp: now,
            })
            .await;
        for &member in &members {
            self.bus
                .publish(BoardEvent::MemberAdded {
                    board,
                    admin: caller,
                    member,
                    timestamp: now,
                })
                .await;
        }
        Ok(board)
    }

    /// Number of boards created through this service's factory.
    pub async fn board_count(&self) -> u64 {
        self.factory.read().await.board_count()
    }

    /// Rebinds a board to `new_version`; factory-Developer gated.
    ///
    /// The factory approves the upgrade, then applies it through its own
    /// board-Developer seat, so board admins cannot self-upgrade. Returns
    /// the previously bound version.
    #[instrument(skip(self), fields(board = %board, new_version = %new_version))]
    pub async fn upgrade_board(
        &self,
        caller: AccountId,
        board: BoardId,
        new_version: Version,
    ) -> Result<Version, FactoryError> {
        let factory = self.factory.read().await;
        if let Err(e) = factory.require_developer(caller) {
            warn!(caller = %caller, error = %e, "Upgrade rejected");
            self.reject().await;
            return Err(e);
        }
        let identity = factory.identity();

        let handle = self.board(board).await?;
        let mut guard = handle.write().await;
        let result = {
            let handle = &mut *guard;
            handle.controller.upgrade(
                identity,
                &handle.state.roles,
                new_version,
                factory.registry(),
            )
        };
        drop(factory);

        match result {
            Ok(old_version) => {
                info!(old = %old_version, "Board upgraded");
                self.bus
                    .publish(BoardEvent::BoardUpgraded {
                        board,
                        developer: caller,
                        old_version,
                        new_version,
                        timestamp: Timestamp::now(),
                    })
                    .await;
                drop(guard);
                self.stats.write().await.upgrades_applied += 1;
                Ok(old_version)
            }
            Err(e) => {
                drop(guard);
                warn!(error = %e, "Upgrade rejected");
                self.reject().await;
                Err(e)
            }
        }
    }

    /// The implementation version a board is currently bound to.
    pub async fn board_version(&self, board: BoardId) -> Result<Version, FactoryError> {
        let handle = self.board(board).await?;
        let version = handle.read().await.version();
        Ok(version)
    }

    /// The board's display name.
    pub async fn board_name(&self, board: BoardId) -> Result<String, FactoryError> {
        let handle = self.board(board).await?;
        let name = handle.read().await.state.name.as_str().to_string();
        Ok(name)
    }

    // =========================================================================
    // LEDGER OPERATIONS
    // =========================================================================

    /// Appends a message; Member gated. Returns the assigned id.
    #[instrument(skip(self, content, topic), fields(board = %board))]
    pub async fn add_message(
        &self,
        caller: AccountId,
        board: BoardId,
        content: &str,
        topic: &str,
    ) -> Result<u64, FactoryError> {
        let handle = self.board(board).await?;
        let now = Timestamp::now();
        // The guard is held across the publish: same-board events must
        // reach the bus in mutation order.
        let mut guard = handle.write().await;
        match guard.add_message(caller, content, topic, now) {
            Ok(id) => {
                self.bus
                    .publish(BoardEvent::MessageAdded {
                        board,
                        id,
                        sender: caller,
                        content: content.to_string(),
                        topic: topic.to_string(),
                        timestamp: now,
                    })
                    .await;
                drop(guard);
                self.stats.write().await.messages_appended += 1;
                Ok(id)
            }
            Err(e) => {
                drop(guard);
                warn!(sender = %caller, error = %e, "Message rejected");
                self.reject().await;
                Err(e.into())
            }
        }
    }

    /// Reads a message by id.
    pub async fn get_message(
        &self,
        board: BoardId,
        id: u64,
    ) -> Result<Message, FactoryError> {
        let handle = self.board(board).await?;
        let message = handle.read().await.get_message(id)?;
        Ok(message)
    }

    /// Reads the messages with ids in the half-open range `from..to`.
    pub async fn get_messages_in_range(
        &self,
        board: BoardId,
        from: u64,
        to: u64,
    ) -> Result<Vec<Message>, FactoryError> {
        let handle = self.board(board).await?;
        let messages = handle.read().await.get_messages_in_range(from, to)?;
        Ok(messages)
    }

    /// The id the next successful append to this board will receive.
    pub async fn next_message_id(&self, board: BoardId) -> Result<u64, FactoryError> {
        let handle = self.board(board).await?;
        let next = handle.read().await.next_message_id();
        Ok(next)
    }

    // =========================================================================
    // MEMBERSHIP OPERATIONS
    // =========================================================================

    /// Grants membership; Admin gated.
    #[instrument(skip(self), fields(board = %board))]
    pub async fn add_member(
        &self,
        caller: AccountId,
        board: BoardId,
        member: AccountId,
    ) -> Result<(), FactoryError> {
        let handle = self.board(board).await?;
        let mut guard = handle.write().await;
        match guard.add_member(caller, member) {
            Ok(()) => {
                self.bus
                    .publish(BoardEvent::MemberAdded {
                        board,
                        admin: caller,
                        member,
                        timestamp: Timestamp::now(),
                    })
                    .await;
                Ok(())
            }
            Err(e) => {
                drop(guard);
                warn!(admin = %caller, member = %member, error = %e, "Member grant rejected");
                self.reject().await;
                Err(e.into())
            }
        }
    }

    /// Grants membership in bulk, all-or-nothing; Admin gated.
    #[instrument(skip(self, members), fields(board = %board, count = members.len()))]
    pub async fn add_members(
        &self,
        caller: AccountId,
        board: BoardId,
        members: &[AccountId],
    ) -> Result<(), FactoryError> {
        let handle = self.board(board).await?;
        let mut guard = handle.write().await;
        match guard.add_members(caller, members) {
            Ok(()) => {
                let now = Timestamp::now();
                for &member in members {
                    self.bus
                        .publish(BoardEvent::MemberAdded {
                            board,
                            admin: caller,
                            member,
                            timestamp: now,
                        })
                        .await;
                }
                Ok(())
            }
            Err(e) => {
                drop(guard);
                warn!(admin = %caller, error = %e, "Bulk member grant rejected");
                self.reject().await;
                Err(e.into())
            }
        }
    }

    /// Revokes membership; Admin gated.
    #[instrument(skip(self), fields(board = %board))]
    pub async fn remove_member(
        &self,
        caller: AccountId,
        board: BoardId,
        member: AccountId,
    ) -> Result<(), FactoryError> {
        let handle = self.board(board).await?;
        let mut guard = handle.write().await;
        match guard.remove_member(caller, member) {
            Ok(()) => {
                self.bus
                    .publish(BoardEvent::MemberRemoved {
                        board,
                        admin: caller,
                        member,
                        timestamp: Timestamp::now(),
                    })
                    .await;
                Ok(())
            }
            Err(e) => {
                drop(guard);
                warn!(admin = %caller, member = %member, error = %e, "Member removal rejected");
                self.reject().await;
                Err(e.into())
            }
        }
    }

    /// Returns true if `account` holds the Member role on the board.
    pub async fn is_member(
        &self,
        board: BoardId,
        account: AccountId,
    ) -> Result<bool, FactoryError> {
        let handle = self.board(board).await?;
        let is_member = handle.read().await.state.roles.is_member(account);
        Ok(is_member)
    }

    // =========================================================================
    // ADMINISTRATION OPERATIONS
    // =========================================================================

    /// Grants the Admin role; Admin gated. Re-granting is a no-op.
    #[instrument(skip(self), fields(board = %board))]
    pub async fn add_admin(
        &self,
        caller: AccountId,
        board: BoardId,
        admin: AccountId,
    ) -> Result<(), FactoryError> {
        let handle = self.board(board).await?;
        let mut guard = handle.write().await;
        match guard.add_admin(caller, admin) {
            Ok(newly_granted) => {
                if newly_granted {
                    self.bus
                        .publish(BoardEvent::AdminGranted {
                            board,
                            granter: caller,
                            admin,
                            timestamp: Timestamp::now(),
                        })
                        .await;
                }
                Ok(())
            }
            Err(e) => {
                drop(guard);
                warn!(granter = %caller, error = %e, "Admin grant rejected");
                self.reject().await;
                Err(e.into())
            }
        }
    }

    /// Revokes the Admin role; Admin gated, self-revocation and last-admin
    /// removal rejected.
    #[instrument(skip(self), fields(board = %board))]
    pub async fn remove_admin(
        &self,
        caller: AccountId,
        board: BoardId,
        admin: AccountId,
    ) -> Result<(), FactoryError> {
        let handle = self.board(board).await?;
        let mut guard = handle.write().await;
        match guard.remove_admin(caller, admin) {
            Ok(()) => {
                self.bus
                    .publish(BoardEvent::AdminRevoked {
                        board,
                        revoker: caller,
                        admin,
                        timestamp: Timestamp::now(),
                    })
                    .await;
                Ok(())
            }
            Err(e) => {
                drop(guard);
                warn!(revoker = %caller, error = %e, "Admin revocation rejected");
                self.reject().await;
                Err(e.into())
            }
        }
    }

    /// Moves administration from the caller to `new_admin` atomically.
    #[instrument(skip(self), fields(board = %board))]
    pub async fn transfer_admin(
        &self,
        caller: AccountId,
        board: BoardId,
        new_admin: AccountId,
    ) -> Result<(), FactoryError> {
        let handle = self.board(board).await?;
        let mut guard = handle.write().await;
        match guard.transfer_admin(caller, new_admin) {
            Ok(()) => {
                self.bus
                    .publish(BoardEvent::AdminTransferred {
                        board,
                        previous: caller,
                        new_admin,
                        timestamp: Timestamp::now(),
                    })
                    .await;
                Ok(())
            }
            Err(e) => {
                drop(guard);
                warn!(previous = %caller, error = %e, "Admin transfer rejected");
                self.reject().await;
                Err(e.into())
            }
        }
    }

    /// Returns true if `account` holds the Admin role on the board.
    pub async fn is_admin(
        &self,
        board: BoardId,
        account: AccountId,
    ) -> Result<bool, FactoryError> {
        let handle = self.board(board).await?;
        let is_admin = handle.read().await.state.roles.is_admin(account);
        Ok(is_admin)
    }

    /// Returns true if `account` holds the Developer role on the board.
    pub async fn is_developer(
        &self,
        board: BoardId,
        account: AccountId,
    ) -> Result<bool, FactoryError> {
        let handle = self.board(board).await?;
        let is_developer = handle.read().await.state.roles.is_developer(account);
        Ok(is_developer)
    }

    // =========================================================================
    // COMMENT OPERATIONS (V2+)
    // =========================================================================

    /// Attaches a comment to a message; Member gated, fails on boards
    /// whose bound version has no comment support.
    #[instrument(skip(self, content), fields(board = %board, message_id = message_id))]
    pub async fn add_comment(
        &self,
        caller: AccountId,
        board: BoardId,
        message_id: u64,
        content: &str,
    ) -> Result<u64, FactoryError> {
        let handle = self.board(board).await?;
        let now = Timestamp::now();
        let mut guard = handle.write().await;
        match guard.add_comment(caller, message_id, content, now) {
            Ok(index) => {
                self.bus
                    .publish(BoardEvent::CommentAdded {
                        board,
                        message_id,
                        index,
                        author: caller,
                        content: content.to_string(),
                        timestamp: now,
                    })
                    .await;
                Ok(index)
            }
            Err(e) => {
                drop(guard);
                warn!(author = %caller, error = %e, "Comment rejected");
                self.reject().await;
                Err(e.into())
            }
        }
    }

    /// Reads a comment by message id and position.
    pub async fn get_comment(
        &self,
        board: BoardId,
        message_id: u64,
        index: u64,
    ) -> Result<Comment, FactoryError> {
        let handle = self.board(board).await?;
        let comment = handle.read().await.get_comment(message_id, index)?;
        Ok(comment)
    }

    /// Number of comments attached to a message.
    pub async fn comment_count(
        &self,
        board: BoardId,
        message_id: u64,
    ) -> Result<u64, FactoryError> {
        let handle = self.board(board).await?;
        let count = handle.read().await.comment_count(message_id)?;
        Ok(count)
    }
}

// =============================================================================
// TESTS
// =============================================================================
