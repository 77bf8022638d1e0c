//! Goal timer model.
//!
//! A goal timer keeps no interval history: `accumulated_seconds` is committed
//! on every active -> inactive transition and `last_resume` marks the start
//! of the current active stretch.
//!
//! # Invariants
//! - `accumulated_seconds` only grows between snapshots.
//! - `last_resume` is meaningful only while `active`.

use crate::model::category::CategoryId;
use crate::model::EpochMs;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time tracked against a vision-board goal, attributed to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTimer {
    pub id: Uuid,
    pub category_id: CategoryId,
    pub accumulated_seconds: i64,
    pub active: bool,
    pub last_resume: Option<EpochMs>,
}

impl GoalTimer {
    /// Creates an inactive timer holding `accumulated_seconds`.
    pub fn paused(category_id: CategoryId, accumulated_seconds: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            accumulated_seconds,
            active: false,
            last_resume: None,
        }
    }

    /// Creates an active timer resumed at `last_resume`.
    pub fn resumed(category_id: CategoryId, accumulated_seconds: i64, last_resume: EpochMs) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            accumulated_seconds,
            active: true,
            last_resume: Some(last_resume),
        }
    }

    /// Whole seconds elapsed in the current active stretch as of `now`.
    ///
    /// Zero when inactive, when no resume instant is recorded, or when
    /// `now` precedes the resume instant.
    pub fn live_elapsed_seconds(&self, now: EpochMs) -> i64 {
        match (self.active, self.last_resume) {
            (true, Some(resumed_at)) => now.saturating_sub(resumed_at).max(0) / 1000,
            _ => 0,
        }
    }

    /// Committed plus live seconds as of `now`.
    pub fn total_seconds(&self, now: EpochMs) -> i64 {
        self.accumulated_seconds
            .saturating_add(self.live_elapsed_seconds(now))
    }
}

#[cfg(test)]
mod tests {
    use super::GoalTimer;
    use uuid::Uuid;

    #[test]
    fn paused_timer_reports_committed_seconds_only() {
        let timer = GoalTimer::paused(Uuid::new_v4(), 20);
        assert_eq!(timer.live_elapsed_seconds(1_000_000), 0);
        assert_eq!(timer.total_seconds(1_000_000), 20);
    }

    #[test]
    fn active_timer_floors_live_seconds() {
        let timer = GoalTimer::resumed(Uuid::new_v4(), 5, 10_000);
        assert_eq!(timer.live_elapsed_seconds(12_999), 2);
        assert_eq!(timer.total_seconds(12_999), 7);
    }

    #[test]
    fn active_timer_without_resume_or_with_future_resume_adds_nothing() {
        let mut timer = GoalTimer::resumed(Uuid::new_v4(), 3, 50_000);
        assert_eq!(timer.live_elapsed_seconds(40_000), 0);

        timer.last_resume = None;
        assert_eq!(timer.total_seconds(90_000), 3);
    }
}
