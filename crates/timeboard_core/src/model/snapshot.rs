//! Immutable input bundle for one aggregation call.

use crate::model::category::{Category, CategoryValidationError};
use crate::model::goal_timer::GoalTimer;
use crate::model::session::Session;
use serde::{Deserialize, Serialize};

/// Categories, sessions and goal timers as handed over by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub goal_timers: Vec<GoalTimer>,
}

impl TrackingSnapshot {
    pub fn new(
        categories: Vec<Category>,
        sessions: Vec<Session>,
        goal_timers: Vec<GoalTimer>,
    ) -> Self {
        Self {
            categories,
            sessions,
            goal_timers,
        }
    }

    /// First session without an end, if any.
    pub fn running_session(&self) -> Option<&Session> {
        self.sessions.iter().find(|session| session.is_running())
    }

    /// Validates every category record; stops at the first failure.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        self.categories.iter().try_for_each(Category::validate)
    }
}
