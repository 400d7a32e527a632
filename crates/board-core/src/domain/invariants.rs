//! # Domain Invariants
//!
//! Runtime checks for the invariants every board must uphold, usable from
//! tests and debug assertions. Each check is a pure predicate; `check_all`
//! collects violations into a report.

use crate::domain::board::BoardState;
use crate::domain::ledger::MessageLedger;
use crate::domain::roles::RoleStore;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// The admin set is never empty once a board is initialized.
#[must_use]
pub fn check_admin_nonempty_invariant(roles: &RoleStore) -> bool {
    roles.admin_count() >= 1
}

/// Ledger ids are exactly 1..next_id: gap-free, strictly increasing, and
/// each record's stored id matches its key.
#[must_use]
pub fn check_ledger_monotonic_invariant(ledger: &MessageLedger) -> bool {
    let mut expected = 1u64;
    for message in ledger.iter() {
        if message.id != expected {
            return false;
        }
        expected += 1;
    }
    expected == ledger.next_id()
}

/// Every stored message carries a strictly positive timestamp.
#[must_use]
pub fn check_timestamp_invariant(ledger: &MessageLedger) -> bool {
    ledger.iter().all(|m| m.timestamp.is_positive())
}

/// Comment lists only reference assigned message ids.
#[must_use]
pub fn check_comment_anchoring_invariant(state: &BoardState) -> bool {
    state
        .comments
        .keys()
        .all(|&message_id| state.ledger.get(message_id).is_ok())
}

/// A violated invariant, with enough context to debug it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The admin set is empty.
    EmptyAdminSet,
    /// Ledger ids are not the gap-free range 1..next_id.
    LedgerNotMonotonic,
    /// A stored message has a zero timestamp.
    ZeroTimestamp,
    /// A comment list references an unassigned message id.
    DanglingComments {
        /// The offending message id.
        message_id: u64,
    },
}

/// Check all invariants at once; an empty vector means the state is sound.
#[must_use]
pub fn check_all_invariants(state: &BoardState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !check_admin_nonempty_invariant(&state.roles) {
        violations.push(InvariantViolation::EmptyAdminSet);
    }
    if !check_ledger_monotonic_invariant(&state.ledger) {
        violations.push(InvariantViolation::LedgerNotMonotonic);
    }
    if !check_timestamp_invariant(&state.ledger) {
        violations.push(InvariantViolation::ZeroTimestamp);
    }
    for &message_id in state.comments.keys() {
        if state.ledger.get(message_id).is_err() {
            violations.push(InvariantViolation::DanglingComments { message_id });
        }
    }

    violations
}

// =============================================================================
// TESTS
// =============================================================================
