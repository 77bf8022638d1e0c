//! Time window resolution and interval overlap.
//!
//! # Responsibility
//! - Turn a named range plus a reference instant into a half-open window.
//! - Measure how much of one interval falls inside another.
//!
//! # Invariants
//! - `TimeWindow::end` is always the reference instant.
//! - Calendar boundaries are taken in the supplied time zone; weeks start
//!   on Monday.
//! - `overlap` never returns a negative duration.

use crate::error::{EngineError, EngineResult};
use crate::model::EpochMs;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named range selector offered by the range picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    Week,
    Month,
    Year,
    All,
}

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 5] = [
        TimeRange::Today,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Year,
        TimeRange::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL_RANGES
            .into_iter()
            .find(|range| range.as_str() == normalized)
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!(
                    "unknown time range `{}`; expected today|week|month|year|all",
                    value.trim()
                ))
            })
    }
}

/// Half-open interval `[start, end)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: EpochMs,
    pub end: EpochMs,
}

impl TimeWindow {
    pub fn new(start: EpochMs, end: EpochMs) -> Self {
        Self { start, end }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end.saturating_sub(self.start).max(0)
    }

    /// Milliseconds of `[start, end)` that fall inside this window.
    pub fn overlap_with(&self, start: EpochMs, end: EpochMs) -> i64 {
        overlap(start, end, self.start, self.end)
    }
}

/// Overlap of `[a_start, a_end)` and `[b_start, b_end)`, clamped at zero.
pub fn overlap(a_start: EpochMs, a_end: EpochMs, b_start: EpochMs, b_end: EpochMs) -> i64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    end.saturating_sub(start).max(0)
}

/// Resolves `range` against `now` in the host's local time zone.
pub fn resolve_window(range: TimeRange, now: EpochMs) -> TimeWindow {
    resolve_window_in(range, now, &Local)
}

/// Resolves `range` against `now` with calendar boundaries taken in `tz`.
///
/// An instant chrono cannot represent yields the empty window `[now, now)`.
pub fn resolve_window_in<Tz: TimeZone>(range: TimeRange, now: EpochMs, tz: &Tz) -> TimeWindow {
    if range == TimeRange::All {
        return TimeWindow::new(0, now);
    }

    let Some(now_utc) = DateTime::<Utc>::from_timestamp_millis(now) else {
        return TimeWindow::new(now, now);
    };
    let today = now_utc.with_timezone(tz).date_naive();
    let first_day = match range {
        TimeRange::Today => Some(today),
        TimeRange::Week => {
            let days_from_monday = i64::from(today.weekday().num_days_from_monday());
            today.checked_sub_signed(Duration::days(days_from_monday))
        }
        TimeRange::Month => today.with_day(1),
        TimeRange::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        TimeRange::All => None,
    };

    let start = first_day
        .and_then(|day| start_of_day(day, tz))
        .map(|start| start.min(now))
        .unwrap_or(now);
    TimeWindow::new(start, now)
}

/// First instant of `day` in `tz`.
///
/// Ambiguous midnights take the earlier instant; when midnight falls in a
/// DST gap the first existing whole hour of the day is used.
fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<EpochMs> {
    (0..24).find_map(|hour| {
        let naive = day.and_hms_opt(hour, 0, 0)?;
        tz.from_local_datetime(&naive)
            .earliest()
            .map(|start| start.timestamp_millis())
    })
}

/// Parses and resolves in one step; unknown selectors are rejected.
pub fn resolve_named_window(range: &str, now: EpochMs) -> EngineResult<TimeWindow> {
    Ok(resolve_window(range.parse()?, now))
}
