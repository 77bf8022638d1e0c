//! Direct (non-rolled-up) time per category.
//!
//! Session time is clipped to the window. Goal-timer time is not: a goal
//! timer only stores a running total, so its whole total is attributed to
//! its category regardless of when it was accumulated.

use crate::aggregate::CategorySeconds;
use crate::model::goal_timer::GoalTimer;
use crate::model::session::Session;
use crate::model::EpochMs;
use crate::window::TimeWindow;
use log::debug;

const MS_PER_SECOND: f64 = 1000.0;

/// Direct seconds per category inside `window`.
///
/// `now` closes running sessions and drives live goal-timer elapsed time.
/// It may lag `window.end` when a live display is frozen; the window itself
/// is never moved. Categories with no contribution may be missing from the
/// result.
pub fn compute_direct_seconds(
    sessions: &[Session],
    goal_timers: &[GoalTimer],
    window: TimeWindow,
    now: EpochMs,
) -> CategorySeconds {
    let mut direct = CategorySeconds::new();

    for session in sessions {
        let overlap_ms = window.overlap_with(session.start, session.effective_end(now));
        if overlap_ms > 0 {
            *direct.entry(session.category_id).or_insert(0.0) += overlap_ms as f64 / MS_PER_SECOND;
        }
    }

    for timer in goal_timers {
        let total = timer.total_seconds(now);
        if total > 0 {
            *direct.entry(timer.category_id).or_insert(0.0) += total as f64;
        }
    }

    debug!(
        "event=direct_seconds module=aggregate status=ok sessions={} goal_timers={} categories={}",
        sessions.len(),
        goal_timers.len(),
        direct.len()
    );
    direct
}

#[cfg(test)]
mod tests {
    use super::compute_direct_seconds;
    use crate::aggregate::seconds_for;
    use crate::model::goal_timer::GoalTimer;
    use crate::model::session::Session;
    use crate::window::TimeWindow;
    use uuid::Uuid;

    #[test]
    fn clips_sessions_to_window() {
        let work = Uuid::new_v4();
        let sessions = vec![
            Session::closed(work, 0, 10_000),
            Session::closed(work, 55_000, 70_000),
            Session::closed(work, 90_000, 95_000),
        ];
        let direct = compute_direct_seconds(&sessions, &[], TimeWindow::new(5_000, 60_000), 60_000);
        assert_eq!(seconds_for(&direct, work), 10.0);
    }

    #[test]
    fn running_session_is_closed_at_now_not_window_end() {
        let work = Uuid::new_v4();
        let sessions = vec![Session::running(work, 10_000)];
        let window = TimeWindow::new(0, 100_000);

        let live = compute_direct_seconds(&sessions, &[], window, 100_000);
        assert_eq!(seconds_for(&live, work), 90.0);

        let frozen = compute_direct_seconds(&sessions, &[], window, 40_000);
        assert_eq!(seconds_for(&frozen, work), 30.0);
    }

    #[test]
    fn keeps_fractional_seconds() {
        let work = Uuid::new_v4();
        let sessions = vec![Session::closed(work, 0, 1_500)];
        let direct = compute_direct_seconds(&sessions, &[], TimeWindow::new(0, 10_000), 10_000);
        assert_eq!(seconds_for(&direct, work), 1.5);
    }

    #[test]
    fn goal_timers_are_added_in_full_regardless_of_window() {
        let study = Uuid::new_v4();
        let timers = vec![
            GoalTimer::paused(study, 3_600),
            GoalTimer::resumed(study, 10, 1_000),
        ];
        // The window ends long before the live stretch, yet nothing is clipped.
        let direct = compute_direct_seconds(&[], &timers, TimeWindow::new(0, 500), 6_500);
        assert_eq!(seconds_for(&direct, study), 3_600.0 + 10.0 + 5.0);
    }

    #[test]
    fn zero_contributions_are_skipped() {
        let idle = Uuid::new_v4();
        let sessions = vec![Session::closed(idle, 200_000, 300_000)];
        let timers = vec![GoalTimer::paused(idle, 0)];
        let direct = compute_direct_seconds(&sessions, &timers, TimeWindow::new(0, 100_000), 100_000);
        assert!(direct.is_empty());
    }

    #[test]
    fn unknown_category_ids_are_kept() {
        let ghost = Uuid::new_v4();
        let sessions = vec![Session::closed(ghost, 0, 2_000)];
        let direct = compute_direct_seconds(&sessions, &[], TimeWindow::new(0, 10_000), 10_000);
        assert_eq!(seconds_for(&direct, ghost), 2.0);
    }
}
