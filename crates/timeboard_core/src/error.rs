//! Engine error taxonomy.
//!
//! # Responsibility
//! - Name the few ways one aggregation call can fail.
//!
//! # Invariants
//! - Errors are fatal to the current call only; the engine holds no state
//!   that a failure could leave half-updated.

use crate::model::category::CategoryId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EngineResult<T> = Result<T, EngineError>;

/// Failure of one engine computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Parent links loop back onto `category_id`; the snapshot is invalid.
    CycleDetected { category_id: CategoryId },
    /// Caller passed a value outside a closed set (e.g. a range selector).
    InvalidArgument(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycleDetected { category_id } => {
                write!(f, "category hierarchy has a cycle through {category_id}")
            }
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
        }
    }
}

impl Error for EngineError {}
