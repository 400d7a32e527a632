//! # Domain Layer
//!
//! Pure domain logic: role sets, the append-only ledger, composed board
//! state, and runtime invariant checks. Nothing in here performs I/O or
//! knows about the event bus.

pub mod board;
pub mod invariants;
pub mod ledger;
pub mod roles;
