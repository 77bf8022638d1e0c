//! Tracking session model.
//!
//! # Invariants
//! - `end == None` means the session is still running.
//! - At most one running session exists across a snapshot; the caller's
//!   start/stop protocol enforces this, not the engine.

use crate::model::category::CategoryId;
use crate::model::EpochMs;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One start/stop interval of wall-clock time attributed to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub category_id: CategoryId,
    pub start: EpochMs,
    pub end: Option<EpochMs>,
}

impl Session {
    /// Creates a finished session.
    pub fn closed(category_id: CategoryId, start: EpochMs, end: EpochMs) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            start,
            end: Some(end),
        }
    }

    /// Creates a session that is still running.
    pub fn running(category_id: CategoryId, start: EpochMs) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            start,
            end: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Stored end, or `now` while the session runs.
    pub fn effective_end(&self, now: EpochMs) -> EpochMs {
        self.end.unwrap_or(now)
    }

    /// Elapsed milliseconds as of `now`, never negative.
    pub fn elapsed_ms(&self, now: EpochMs) -> i64 {
        self.effective_end(now).saturating_sub(self.start).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use uuid::Uuid;

    #[test]
    fn running_session_ends_at_now() {
        let session = Session::running(Uuid::new_v4(), 1_000);
        assert!(session.is_running());
        assert_eq!(session.effective_end(4_500), 4_500);
        assert_eq!(session.elapsed_ms(4_500), 3_500);
    }

    #[test]
    fn elapsed_is_clamped_for_reversed_interval() {
        let session = Session::closed(Uuid::new_v4(), 10_000, 2_000);
        assert!(!session.is_running());
        assert_eq!(session.elapsed_ms(50_000), 0);
    }
}
