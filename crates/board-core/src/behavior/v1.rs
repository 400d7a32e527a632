//! # Board Behavior, Version 1
//!
//! The original board surface: messages, membership, administration.
//! Comment operations do not exist in this version and fail with
//! `UnsupportedOperation`.

use crate::behavior::BoardImplementation;
use board_types::Version;

/// The initial board implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardV1;

impl BoardImplementation for BoardV1 {
    fn version(&self) -> Version {
        Version::new(1)
    }
}

// =============================================================================
// TESTS
// =============================================================================
