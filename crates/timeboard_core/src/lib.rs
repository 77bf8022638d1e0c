//! Time aggregation engine for Timeboard.
//! Pure computations over category, session and goal-timer snapshots.

pub mod aggregate;
pub mod error;
pub mod format;
pub mod hierarchy;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod window;

pub use aggregate::direct::compute_direct_seconds;
pub use aggregate::rollup::{rollup_seconds, rollup_with_index};
pub use aggregate::share::{
    goal_progress, share_breakdown, share_pct, validate_goal_sum, visible_total, GoalCandidate,
    GoalProgress, GoalSumReport, ShareRow,
};
pub use aggregate::{seconds_for, CategorySeconds};
pub use error::{EngineError, EngineResult};
pub use format::format_duration;
pub use hierarchy::{HierarchyIndex, LevelKey};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::category::{Category, CategoryId, CategoryValidationError};
pub use model::goal_timer::GoalTimer;
pub use model::session::Session;
pub use model::snapshot::TrackingSnapshot;
pub use model::EpochMs;
pub use repo::snapshot_source::{SnapshotError, SnapshotResult, SnapshotSource};
pub use service::report_service::{
    ReportError, ReportRequest, ReportRow, ReportService, TimeReport,
};
pub use window::{
    overlap, resolve_named_window, resolve_window, resolve_window_in, TimeRange, TimeWindow,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
