//! # Board Bus - Observable Events for External Collaborators
//!
//! Every successful state mutation in the system is announced on this bus
//! so that external monitoring and indexing collaborators can follow along:
//! implementation registrations, board creations, message appends, role
//! changes, and upgrades.
//!
//! Events are emitted after the mutation commits; a rejected operation
//! never produces an event.
//!
//! ## Delivery Model
//!
//! In-memory `tokio::sync::broadcast` fan-out: multi-producer,
//! multi-consumer, per-subscriber topic filtering. Suitable for a single
//! authoritative execution context; a distributed deployment would swap in
//! a different `EventPublisher` implementation.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{BoardEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
