//! Snapshot records the engine aggregates over.
//!
//! # Responsibility
//! - Define categories, tracking sessions and goal timers as typed records.
//! - Bundle them into one immutable snapshot per computation.
//!
//! # Invariants
//! - Instants are Unix epoch milliseconds (`EpochMs`).
//! - Optional fields are `Option`, never sentinel values.

pub mod category;
pub mod goal_timer;
pub mod session;
pub mod snapshot;

/// Unix epoch milliseconds.
pub type EpochMs = i64;
