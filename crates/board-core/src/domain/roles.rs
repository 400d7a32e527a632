//! # Role Store
//!
//! Three explicit membership sets per board (Developer, Admin, Member)
//! plus pure predicate functions. There is no role hierarchy or
//! inheritance; every privileged operation checks exactly the predicate
//! it needs.
//!
//! ## Invariants
//!
//! - The admin set is non-empty from initialization onward: removing the
//!   last admin is rejected, and transfer replaces membership atomically.
//! - An admin can never revoke their own role, regardless of admin count.
//! - The zero identity never holds a role.

use crate::errors::BoardError;
use board_types::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum accounts per bulk membership grant.
pub const MAX_BATCH_SIZE: usize = 50;

/// The three role tiers.
///
/// `Developer` authorizes implementation upgrades, `Admin` manages the
/// member and admin sets, `Member` may append messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleKind {
    /// Highest trust tier; approves implementation upgrades.
    Developer,
    /// Manages membership and the admin set.
    Admin,
    /// May append messages to the ledger.
    Member,
}

/// Per-board role assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStore {
    developers: HashSet<AccountId>,
    admins: HashSet<AccountId>,
    members: HashSet<AccountId>,
}

impl RoleStore {
    /// Creates a role store seeded for a new board.
    ///
    /// The initial admin also receives the Developer role, and the factory
    /// identity is registered as a Developer so it can approve upgrades on
    /// the board's behalf. Both identities must be non-zero.
    pub fn new(initial_admin: AccountId, factory: AccountId) -> Result<Self, BoardError> {
        if initial_admin.is_zero() || factory.is_zero() {
            return Err(BoardError::NullAddress);
        }
        let mut admins = HashSet::new();
        admins.insert(initial_admin);

        let mut developers = HashSet::new();
        developers.insert(initial_admin);
        developers.insert(factory);

        Ok(Self {
            developers,
            admins,
            members: HashSet::new(),
        })
    }

    // =========================================================================
    // PREDICATES
    // =========================================================================

    /// Returns true if `id` holds the Admin role.
    #[must_use]
    pub fn is_admin(&self, id: AccountId) -> bool {
        self.admins.contains(&id)
    }

    /// Returns true if `id` holds the Member role.
    #[must_use]
    pub fn is_member(&self, id: AccountId) -> bool {
        self.members.contains(&id)
    }

    /// Returns true if `id` holds the Developer role.
    #[must_use]
    pub fn is_developer(&self, id: AccountId) -> bool {
        self.developers.contains(&id)
    }

    /// Number of admins currently assigned.
    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.admins.len()
    }

    /// Number of members currently assigned.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Fails with `Unauthorized` unless `caller` is an admin.
    pub fn require_admin(&self, caller: AccountId) -> Result<(), BoardError> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            Err(BoardError::Unauthorized {
                caller,
                required: RoleKind::Admin,
            })
        }
    }

    /// Fails with `Unauthorized` unless `caller` is a developer.
    pub fn require_developer(&self, caller: AccountId) -> Result<(), BoardError> {
        if self.is_developer(caller) {
            Ok(())
        } else {
            Err(BoardError::Unauthorized {
                caller,
                required: RoleKind::Developer,
            })
        }
    }

    /// Fails with `Unauthorized` unless `caller` is a member.
    pub fn require_member(&self, caller: AccountId) -> Result<(), BoardError> {
        if self.is_member(caller) {
            Ok(())
        } else {
            Err(BoardError::Unauthorized {
                caller,
                required: RoleKind::Member,
            })
        }
    }

    // =========================================================================
    // ADMIN MANAGEMENT
    // =========================================================================

    /// Grants the Admin role to `target`.
    ///
    /// Re-affirming an existing admin is not an error; returns whether the
    /// grant was new. (This asymmetry with [`RoleStore::grant_member`] is
    /// deliberate and matches observed behavior.)
    pub fn grant_admin(&mut self, caller: AccountId, target: AccountId) -> Result<bool, BoardError> {
        self.require_admin(caller)?;
        if target.is_zero() {
            return Err(BoardError::NullAddress);
        }
        Ok(self.admins.insert(target))
    }

    /// Revokes the Admin role from `target`.
    ///
    /// Self-revocation is rejected outright, before the count check.
    /// Removing the only remaining admin is rejected. Revoking a non-admin
    /// is a no-op success: the admin set is unchanged and stays non-empty.
    pub fn revoke_admin(&mut self, caller: AccountId, target: AccountId) -> Result<(), BoardError> {
        self.require_admin(caller)?;
        if caller == target {
            return Err(BoardError::SelfRevocation);
        }
        if self.admins.contains(&target) && self.admins.len() == 1 {
            return Err(BoardError::LastAdmin);
        }
        self.admins.remove(&target);
        Ok(())
    }

    /// Moves board administration from `caller` to `new_admin` atomically.
    ///
    /// There is no intermediate point where neither identity is an admin.
    /// Transferring to oneself is a no-op success; the grant-then-revoke
    /// order would otherwise empty the admin set.
    pub fn transfer_admin(
        &mut self,
        caller: AccountId,
        new_admin: AccountId,
    ) -> Result<(), BoardError> {
        self.require_admin(caller)?;
        if new_admin.is_zero() {
            return Err(BoardError::NullAddress);
        }
        if new_admin == caller {
            return Ok(());
        }
        self.admins.insert(new_admin);
        self.admins.remove(&caller);
        Ok(())
    }

    // =========================================================================
    // MEMBER MANAGEMENT
    // =========================================================================

    /// Grants the Member role to `target`.
    ///
    /// Duplicate grants are an explicit error, not a no-op.
    pub fn grant_member(&mut self, caller: AccountId, target: AccountId) -> Result<(), BoardError> {
        self.require_admin(caller)?;
        if target.is_zero() {
            return Err(BoardError::NullAddress);
        }
        if self.members.contains(&target) {
            return Err(BoardError::AlreadyMember(target));
        }
        self.members.insert(target);
        Ok(())
    }

    /// Grants the Member role to every account in `targets`.
    ///
    /// The whole batch is validated before any grant is applied: size
    /// bound, no zero identities, no repeats within the batch, no existing
    /// members. A failing batch leaves the store untouched.
    pub fn grant_members(
        &mut self,
        caller: AccountId,
        targets: &[AccountId],
    ) -> Result<(), BoardError> {
        self.require_admin(caller)?;
        if targets.is_empty() {
            return Err(BoardError::EmptyBatch);
        }
        if targets.len() > MAX_BATCH_SIZE {
            return Err(BoardError::BatchTooLarge {
                len: targets.len(),
                max: MAX_BATCH_SIZE,
            });
        }

        // Validate the whole batch before touching state.
        let mut seen = HashSet::with_capacity(targets.len());
        for target in targets {
            if target.is_zero() {
                return Err(BoardError::NullAddress);
            }
            if self.members.contains(target) || !seen.insert(*target) {
                return Err(BoardError::AlreadyMember(*target));
            }
        }

        for target in targets {
            self.members.insert(*target);
        }
        Ok(())
    }

    /// Revokes the Member role from `target`.
    pub fn revoke_member(
        &mut self,
        caller: AccountId,
        target: AccountId,
    ) -> Result<(), BoardError> {
        self.require_admin(caller)?;
        if !self.members.contains(&target) {
            return Err(BoardError::NotAMember(target));
        }
        self.members.remove(&target);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
