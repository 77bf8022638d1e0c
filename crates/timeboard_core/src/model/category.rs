//! Category domain model.
//!
//! # Responsibility
//! - Define the tracking bucket that sessions and goal timers point at.
//! - Validate a single record before it enters an aggregation snapshot.
//!
//! # Invariants
//! - `id` is stable and never nil.
//! - `parent_id == None` marks a root; a category is never its own parent.
//! - `goal_pct`, when set, is a finite value in `0..=100`.
//! - `color` is a `#RGB` or `#RRGGBB` hex string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a category.
pub type CategoryId = Uuid;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

/// Default colour assigned to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6366f1";

/// Validation failures for a single category record.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValidationError {
    NilId,
    BlankName(CategoryId),
    SelfParent(CategoryId),
    GoalOutOfRange { id: CategoryId, goal_pct: f64 },
    InvalidColor { id: CategoryId, color: String },
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "category id must not be nil"),
            Self::BlankName(id) => write!(f, "category name must not be blank: {id}"),
            Self::SelfParent(id) => write!(f, "category cannot be its own parent: {id}"),
            Self::GoalOutOfRange { id, goal_pct } => {
                write!(f, "goal percentage {goal_pct} out of 0..=100 for {id}")
            }
            Self::InvalidColor { id, color } => {
                write!(f, "category color `{color}` is not a hex color for {id}")
            }
        }
    }
}

impl Error for CategoryValidationError {}

/// User-defined bucket time is tracked against, possibly nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    /// Target share of the parent's tracked time (or global time for roots).
    pub goal_pct: Option<f64>,
    pub icon: Option<String>,
    pub parent_id: Option<CategoryId>,
    /// Left out of goal-sum validation and of the "included" denominator.
    #[serde(default)]
    pub exclude_from_goals: bool,
}

impl Category {
    /// Creates a root category with a generated id and the default colour.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a root category with a caller-provided id.
    pub fn with_id(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            goal_pct: None,
            icon: None,
            parent_id: None,
            exclude_from_goals: false,
        }
    }

    /// Builder-style parent assignment.
    pub fn child_of(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Builder-style goal assignment.
    pub fn with_goal(mut self, goal_pct: f64) -> Self {
        self.goal_pct = Some(goal_pct);
        self
    }

    /// Builder-style exclusion flag.
    pub fn excluded_from_goals(mut self) -> Self {
        self.exclude_from_goals = true;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Goal that counts toward sibling-sum validation, if any.
    pub fn counted_goal(&self) -> Option<f64> {
        if self.exclude_from_goals {
            None
        } else {
            self.goal_pct
        }
    }

    /// Checks the record-level invariants listed in the module docs.
    ///
    /// Hierarchy-wide invariants (acyclic parents, sibling goal sums) are
    /// not checked here; see `aggregate::rollup` and `aggregate::share`.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.id.is_nil() {
            return Err(CategoryValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::BlankName(self.id));
        }
        if self.parent_id == Some(self.id) {
            return Err(CategoryValidationError::SelfParent(self.id));
        }
        if let Some(goal_pct) = self.goal_pct {
            if !goal_pct.is_finite() || !(0.0..=100.0).contains(&goal_pct) {
                return Err(CategoryValidationError::GoalOutOfRange {
                    id: self.id,
                    goal_pct,
                });
            }
        }
        if !HEX_COLOR_RE.is_match(self.color.as_str()) {
            return Err(CategoryValidationError::InvalidColor {
                id: self.id,
                color: self.color.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryValidationError};
    use uuid::Uuid;

    #[test]
    fn new_category_is_valid_root() {
        let category = Category::new("Work");
        assert!(category.is_root());
        assert!(!category.exclude_from_goals);
        category.validate().expect("fresh category should validate");
    }

    #[test]
    fn validate_accepts_short_and_long_hex_colors() {
        let mut category = Category::new("Reading");
        category.color = "#fA0".to_string();
        category.validate().expect("#RGB should validate");
        category.color = "#00ff7F".to_string();
        category.validate().expect("#RRGGBB should validate");
    }

    #[test]
    fn validate_rejects_bad_color() {
        let mut category = Category::new("Reading");
        category.color = "teal".to_string();
        let err = category.validate().expect_err("named color must be rejected");
        assert!(matches!(err, CategoryValidationError::InvalidColor { .. }));
    }

    #[test]
    fn validate_rejects_goal_outside_percentage_range() {
        let category = Category::new("Sleep").with_goal(100.5);
        let err = category.validate().expect_err("goal above 100 must be rejected");
        assert!(matches!(err, CategoryValidationError::GoalOutOfRange { .. }));

        let category = Category::new("Sleep").with_goal(f64::NAN);
        assert!(category.validate().is_err());
    }

    #[test]
    fn validate_rejects_self_parent_and_nil_id() {
        let category = Category::new("Loop");
        let looped = category.clone().child_of(category.id);
        assert_eq!(
            looped.validate().expect_err("self parent must be rejected"),
            CategoryValidationError::SelfParent(category.id)
        );

        let nil = Category::with_id(Uuid::nil(), "Nil");
        assert_eq!(
            nil.validate().expect_err("nil id must be rejected"),
            CategoryValidationError::NilId
        );
    }

    #[test]
    fn counted_goal_ignores_excluded_categories() {
        let counted = Category::new("Work").with_goal(40.0);
        let excluded = Category::new("Sleep").with_goal(30.0).excluded_from_goals();
        assert_eq!(counted.counted_goal(), Some(40.0));
        assert_eq!(excluded.counted_goal(), None);
    }
}
