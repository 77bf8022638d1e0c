//! Data access contracts for snapshot providers.
//!
//! # Responsibility
//! - Define how callers hand immutable snapshots to the engine.
//! - Keep the engine unaware of where categories and sessions are stored.

pub mod snapshot_source;
