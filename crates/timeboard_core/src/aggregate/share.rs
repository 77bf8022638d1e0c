//! Share percentages and goal-sum validation.
//!
//! Two percentage semantics live here and are kept apart on purpose:
//! - share: rolled time over the total of *all* visible siblings, with no
//!   exclusion filtering (what charts display);
//! - goal progress and goal sums: only categories not flagged
//!   `exclude_from_goals` take part.
//!
//! # Invariants
//! - Shares are integers in `0..=100` and all zero when the visible total
//!   is zero.
//! - Validation only reports; rejecting a write is the caller's decision.

use crate::aggregate::{seconds_for, CategorySeconds};
use crate::hierarchy::LevelKey;
use crate::model::category::{Category, CategoryId};
use serde::{Deserialize, Serialize};

/// Sibling goals may add up to this many percent.
pub const MAX_GOAL_SUM_PCT: f64 = 100.0;
/// Slack for float noise in sums such as `33.3 + 33.3 + 33.4`.
const GOAL_SUM_EPSILON: f64 = 1e-9;

/// One category's slice of a visible level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShareRow {
    pub category_id: CategoryId,
    pub seconds: f64,
    pub share_pct: u8,
}

/// Sum of rolled seconds over `visible`.
pub fn visible_total(rolled: &CategorySeconds, visible: &[CategoryId]) -> f64 {
    visible.iter().map(|id| seconds_for(rolled, *id)).sum()
}

/// Rounded share of `category_id` within the visible set.
pub fn share_pct(category_id: CategoryId, rolled: &CategorySeconds, visible: &[CategoryId]) -> u8 {
    rounded_pct(seconds_for(rolled, category_id), visible_total(rolled, visible))
}

/// Share rows for a whole visible set, in input order.
pub fn share_breakdown(visible: &[CategoryId], rolled: &CategorySeconds) -> Vec<ShareRow> {
    let total = visible_total(rolled, visible);
    visible
        .iter()
        .map(|id| {
            let seconds = seconds_for(rolled, *id);
            ShareRow {
                category_id: *id,
                seconds,
                share_pct: rounded_pct(seconds, total),
            }
        })
        .collect()
}

fn rounded_pct(part: f64, total: f64) -> u8 {
    if total <= 0.0 || !total.is_finite() {
        return 0;
    }
    (100.0 * part / total).round().clamp(0.0, 100.0) as u8
}

/// Proposed goal for a new or edited category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalCandidate {
    /// `None` for a category that does not exist yet.
    pub category_id: Option<CategoryId>,
    pub goal_pct: Option<f64>,
    #[serde(default)]
    pub exclude_from_goals: bool,
}

impl GoalCandidate {
    /// Goal for a category about to be created.
    pub fn new_category(goal_pct: f64) -> Self {
        Self {
            category_id: None,
            goal_pct: Some(goal_pct),
            exclude_from_goals: false,
        }
    }

    /// Replacement goal for an existing category.
    pub fn edit(category_id: CategoryId, goal_pct: f64) -> Self {
        Self {
            category_id: Some(category_id),
            goal_pct: Some(goal_pct),
            exclude_from_goals: false,
        }
    }

    fn counted_goal(&self) -> f64 {
        if self.exclude_from_goals {
            0.0
        } else {
            self.goal_pct.unwrap_or(0.0)
        }
    }
}

/// Outcome of a goal-sum check for one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSumReport {
    pub sum: f64,
    pub exceeds: bool,
    /// Percent still unallocated at the level, never negative.
    pub remaining: f64,
}

/// Sums non-excluded sibling goals at `level` with `candidate` applied.
///
/// The candidate replaces its stored counterpart when it edits an existing
/// category and is added otherwise, including when the edit moves a
/// category onto `level` from elsewhere. An edit of a category stored as
/// excluded from goals adds nothing, whatever the candidate's own flag.
pub fn validate_goal_sum(
    categories: &[Category],
    level: LevelKey,
    candidate: &GoalCandidate,
) -> GoalSumReport {
    let siblings: f64 = categories
        .iter()
        .filter(|category| LevelKey::for_parent(category.parent_id) == level)
        .filter(|category| Some(category.id) != candidate.category_id)
        .filter_map(Category::counted_goal)
        .sum();
    let stored_excluded = candidate.category_id.is_some_and(|id| {
        categories
            .iter()
            .any(|category| category.id == id && category.exclude_from_goals)
    });
    let candidate_goal = if stored_excluded {
        0.0
    } else {
        candidate.counted_goal()
    };
    let sum = siblings + candidate_goal;

    GoalSumReport {
        sum,
        exceeds: sum > MAX_GOAL_SUM_PCT + GOAL_SUM_EPSILON,
        remaining: (MAX_GOAL_SUM_PCT - sum).max(0.0),
    }
}

/// Goal against actual for one category at a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub category_id: CategoryId,
    pub goal_pct: f64,
    /// Share of the level's included (non-excluded) rolled time.
    pub actual_pct: f64,
    /// `actual_pct - goal_pct`; positive means ahead of the goal.
    pub deviation_pct: f64,
}

/// Goal progress for every non-excluded category with a goal at `level`.
///
/// The denominator is the rolled total of non-excluded categories at the
/// level; when it is zero every actual share is zero.
pub fn goal_progress(
    categories: &[Category],
    rolled: &CategorySeconds,
    level: LevelKey,
) -> Vec<GoalProgress> {
    let included: Vec<&Category> = categories
        .iter()
        .filter(|category| LevelKey::for_parent(category.parent_id) == level)
        .filter(|category| !category.exclude_from_goals)
        .collect();
    let included_total: f64 = included
        .iter()
        .map(|category| seconds_for(rolled, category.id))
        .sum();

    included
        .into_iter()
        .filter_map(|category| {
            let goal_pct = category.goal_pct?;
            let actual_pct = if included_total > 0.0 {
                100.0 * seconds_for(rolled, category.id) / included_total
            } else {
                0.0
            };
            Some(GoalProgress {
                category_id: category.id,
                goal_pct,
                actual_pct,
                deviation_pct: actual_pct - goal_pct,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        goal_progress, share_breakdown, share_pct, validate_goal_sum, GoalCandidate,
    };
    use crate::aggregate::CategorySeconds;
    use crate::hierarchy::LevelKey;
    use crate::model::category::Category;

    #[test]
    fn share_is_zero_when_nothing_was_tracked() {
        let a = Category::new("A");
        let b = Category::new("B");
        let visible = [a.id, b.id];
        let rolled = CategorySeconds::new();
        assert_eq!(share_pct(a.id, &rolled, &visible), 0);
        assert!(share_breakdown(&visible, &rolled)
            .iter()
            .all(|row| row.share_pct == 0));
    }

    #[test]
    fn share_rounds_against_visible_total_without_exclusion() {
        let a = Category::new("A");
        let b = Category::new("B").excluded_from_goals();
        let c = Category::new("C");
        let rolled = CategorySeconds::from([(a.id, 1.0), (b.id, 1.0), (c.id, 1.0)]);
        let visible = [a.id, b.id, c.id];

        let rows = share_breakdown(&visible, &rolled);
        assert_eq!(
            rows.iter().map(|row| row.share_pct).collect::<Vec<_>>(),
            vec![33, 33, 33]
        );
        assert_eq!(share_pct(b.id, &rolled, &visible), 33);
    }

    #[test]
    fn share_rounds_half_up() {
        let a = Category::new("A");
        let b = Category::new("B");
        let rolled = CategorySeconds::from([(a.id, 1.0), (b.id, 7.0)]);
        // 12.5 -> 13, 87.5 -> 88
        assert_eq!(share_pct(a.id, &rolled, &[a.id, b.id]), 13);
        assert_eq!(share_pct(b.id, &rolled, &[a.id, b.id]), 88);
    }

    #[test]
    fn goal_sum_examples_at_root() {
        let a = Category::new("A").with_goal(60.0);
        let b = Category::new("B").with_goal(40.0);
        let categories = vec![a.clone(), b];

        let report = validate_goal_sum(&categories, LevelKey::Root, &GoalCandidate::edit(a.id, 50.0));
        assert_eq!(report.sum, 90.0);
        assert!(!report.exceeds);
        assert_eq!(report.remaining, 10.0);

        let report = validate_goal_sum(&categories, LevelKey::Root, &GoalCandidate::edit(a.id, 70.0));
        assert_eq!(report.sum, 100.0);
        assert!(!report.exceeds);

        let report = validate_goal_sum(&categories, LevelKey::Root, &GoalCandidate::edit(a.id, 71.0));
        assert_eq!(report.sum, 101.0);
        assert!(report.exceeds);
        assert_eq!(report.remaining, 0.0);
    }

    #[test]
    fn goal_sum_adds_new_category_and_skips_excluded() {
        let parent = Category::new("Parent");
        let child = Category::new("Child").child_of(parent.id).with_goal(70.0);
        let excluded = Category::new("Sleep")
            .child_of(parent.id)
            .with_goal(90.0)
            .excluded_from_goals();
        let root_goal = Category::new("Other root").with_goal(80.0);
        let categories = vec![parent.clone(), child, excluded, root_goal];

        let level = LevelKey::Children(parent.id);
        let report = validate_goal_sum(&categories, level, &GoalCandidate::new_category(30.0));
        assert_eq!(report.sum, 100.0);
        assert!(!report.exceeds);

        let mut excluded_candidate = GoalCandidate::new_category(50.0);
        excluded_candidate.exclude_from_goals = true;
        let report = validate_goal_sum(&categories, level, &excluded_candidate);
        assert_eq!(report.sum, 70.0);
    }

    #[test]
    fn editing_an_excluded_category_never_counts_its_goal() {
        let a = Category::new("A").with_goal(60.0).excluded_from_goals();
        let b = Category::new("B").with_goal(40.0);
        let categories = vec![a.clone(), b];

        let report = validate_goal_sum(&categories, LevelKey::Root, &GoalCandidate::edit(a.id, 90.0));
        assert_eq!(report.sum, 40.0);
        assert!(!report.exceeds);
        assert_eq!(report.remaining, 60.0);
    }

    #[test]
    fn goal_sum_tolerates_float_noise() {
        let a = Category::new("A").with_goal(33.3);
        let b = Category::new("B").with_goal(33.3);
        let report = validate_goal_sum(&[a, b], LevelKey::Root, &GoalCandidate::new_category(33.4));
        assert!(!report.exceeds);
    }

    #[test]
    fn goal_progress_uses_included_denominator() {
        let work = Category::new("Work").with_goal(50.0);
        let play = Category::new("Play").with_goal(50.0);
        let sleep = Category::new("Sleep").with_goal(30.0).excluded_from_goals();
        let rolled = CategorySeconds::from([(work.id, 30.0), (play.id, 10.0), (sleep.id, 60.0)]);
        let categories = vec![work.clone(), play.clone(), sleep];

        let progress = goal_progress(&categories, &rolled, LevelKey::Root);
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].category_id, work.id);
        assert_eq!(progress[0].actual_pct, 75.0);
        assert_eq!(progress[0].deviation_pct, 25.0);
        assert_eq!(progress[1].actual_pct, 25.0);
        assert_eq!(progress[1].deviation_pct, -25.0);
    }
}
