//! Time report use-case service.
//!
//! # Responsibility
//! - Run the whole aggregation pipeline for one snapshot and range.
//! - Shape a level's rows for progress displays.
//!
//! # Invariants
//! - Every call loads a fresh snapshot and recomputes from scratch.
//! - `freeze_at` only replaces the live instant; the window still ends at
//!   `now`.

use crate::aggregate::direct::compute_direct_seconds;
use crate::aggregate::rollup::rollup_with_index;
use crate::aggregate::share::{goal_progress, share_breakdown, visible_total, GoalProgress};
use crate::aggregate::CategorySeconds;
use crate::error::EngineError;
use crate::format::format_duration;
use crate::hierarchy::{HierarchyIndex, LevelKey};
use crate::model::category::CategoryId;
use crate::model::EpochMs;
use crate::repo::snapshot_source::{SnapshotError, SnapshotSource};
use crate::window::{resolve_window, resolve_window_in, TimeRange, TimeWindow};
use chrono::TimeZone;
use log::{debug, error};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for report computation.
#[derive(Debug)]
pub enum ReportError {
    /// Snapshot could not be loaded or failed record validation.
    Snapshot(SnapshotError),
    /// Aggregation failed on the loaded snapshot.
    Engine(EngineError),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::Engine(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Snapshot(err) => Some(err),
            Self::Engine(err) => Some(err),
        }
    }
}

impl From<SnapshotError> for ReportError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<EngineError> for ReportError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Inputs for one report computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub range: TimeRange,
    pub now: EpochMs,
    /// Live instant to use instead of `now`, e.g. while a chart is hovered.
    pub freeze_at: Option<EpochMs>,
    /// Level whose rows the report lists.
    pub level: LevelKey,
}

impl ReportRequest {
    /// Root-level report for `range` as of `now`.
    pub fn new(range: TimeRange, now: EpochMs) -> Self {
        Self {
            range,
            now,
            freeze_at: None,
            level: LevelKey::Root,
        }
    }

    pub fn at_level(mut self, level: LevelKey) -> Self {
        self.level = level;
        self
    }

    pub fn frozen_at(mut self, instant: EpochMs) -> Self {
        self.freeze_at = Some(instant);
        self
    }

    fn live_instant(&self) -> EpochMs {
        self.freeze_at.unwrap_or(self.now)
    }
}

/// One visible category row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub category_id: CategoryId,
    pub name: String,
    pub color: String,
    pub seconds: f64,
    pub share_pct: u8,
    pub duration_label: String,
    pub is_leaf: bool,
}

/// Aggregated view of one snapshot over one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeReport {
    pub window: TimeWindow,
    pub level: LevelKey,
    pub direct: CategorySeconds,
    pub rolled: CategorySeconds,
    pub rows: Vec<ReportRow>,
    /// Rolled total of the listed level.
    pub visible_total: f64,
    pub goals: Vec<GoalProgress>,
    /// Live elapsed seconds of the running session, if one exists.
    pub running_elapsed_seconds: Option<f64>,
}

/// Report service facade over a snapshot source.
pub struct ReportService<S: SnapshotSource> {
    source: S,
}

impl<S: SnapshotSource> ReportService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Builds a report with calendar boundaries in local time.
    pub fn build_report(&self, request: &ReportRequest) -> Result<TimeReport, ReportError> {
        let window = resolve_window(request.range, request.now);
        self.build_for_window(window, request)
    }

    /// Builds a report with calendar boundaries in `tz`.
    pub fn build_report_in<Tz: TimeZone>(
        &self,
        request: &ReportRequest,
        tz: &Tz,
    ) -> Result<TimeReport, ReportError> {
        let window = resolve_window_in(request.range, request.now, tz);
        self.build_for_window(window, request)
    }

    fn build_for_window(
        &self,
        window: TimeWindow,
        request: &ReportRequest,
    ) -> Result<TimeReport, ReportError> {
        let snapshot = self.source.load_snapshot()?;
        snapshot.validate().map_err(|err| {
            error!("event=report_build module=service status=error reason=invalid_category");
            SnapshotError::from(err)
        })?;

        let live = request.live_instant();
        let index = HierarchyIndex::build(&snapshot.categories);
        let direct = compute_direct_seconds(&snapshot.sessions, &snapshot.goal_timers, window, live);
        let rolled = rollup_with_index(&index, &direct)?;

        let visible = index.children_of(request.level);
        let rows = share_breakdown(visible, &rolled)
            .into_iter()
            .filter_map(|share| {
                let category = snapshot
                    .categories
                    .iter()
                    .find(|category| category.id == share.category_id)?;
                Some(ReportRow {
                    category_id: share.category_id,
                    name: category.name.clone(),
                    color: category.color.clone(),
                    seconds: share.seconds,
                    share_pct: share.share_pct,
                    duration_label: format_duration(share.seconds),
                    is_leaf: index.is_leaf(share.category_id),
                })
            })
            .collect::<Vec<_>>();

        let running_elapsed_seconds = snapshot
            .running_session()
            .map(|session| session.elapsed_ms(live) as f64 / 1000.0);

        debug!(
            "event=report_build module=service status=ok range={} categories={} rows={}",
            request.range,
            index.len(),
            rows.len()
        );

        Ok(TimeReport {
            window,
            level: request.level,
            visible_total: visible_total(&rolled, visible),
            goals: goal_progress(&snapshot.categories, &rolled, request.level),
            direct,
            rolled,
            rows,
            running_elapsed_seconds,
        })
    }
}
