//! Snapshot source contract.
//!
//! # Invariants
//! - Every `load_snapshot` call returns a fresh, self-contained snapshot;
//!   the engine never caches one across calls.

use crate::model::category::CategoryValidationError;
use crate::model::snapshot::TrackingSnapshot;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Failure while obtaining or checking a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// A category record breaks a record-level invariant.
    Validation(CategoryValidationError),
    /// The backing store failed; message is store-specific.
    Source(String),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Source(message) => write!(f, "snapshot source failed: {message}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Source(_) => None,
        }
    }
}

impl From<CategoryValidationError> for SnapshotError {
    fn from(value: CategoryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Provider of tracking snapshots (database, sync cache, fixture...).
pub trait SnapshotSource {
    fn load_snapshot(&self) -> SnapshotResult<TrackingSnapshot>;
}

impl SnapshotSource for TrackingSnapshot {
    fn load_snapshot(&self) -> SnapshotResult<TrackingSnapshot> {
        Ok(self.clone())
    }
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &S {
    fn load_snapshot(&self) -> SnapshotResult<TrackingSnapshot> {
        (**self).load_snapshot()
    }
}
