//! Time aggregation pipeline.
//!
//! # Responsibility
//! - Attribute session and goal-timer time to categories within a window.
//! - Roll child time up into ancestors.
//! - Derive share percentages and goal-sum checks from rolled totals.
//!
//! # Invariants
//! - Every function is pure over its inputs; nothing is cached across calls.
//! - Seconds are non-negative `f64` values keyed by category id.

use crate::model::category::CategoryId;
use std::collections::HashMap;

pub mod direct;
pub mod rollup;
pub mod share;

/// Seconds attributed to each category.
pub type CategorySeconds = HashMap<CategoryId, f64>;

/// Seconds for `id`, treating an absent entry as zero.
pub fn seconds_for(seconds: &CategorySeconds, id: CategoryId) -> f64 {
    seconds.get(&id).copied().unwrap_or(0.0)
}
