//! Human-readable durations.
//!
//! | Duration            | Units shown                        |
//! |---------------------|------------------------------------|
//! | >= 1 year           | years, then days if nonzero        |
//! | >= 1 day, < 1 year  | days, then hours if nonzero        |
//! | >= 1 hour, < 1 day  | hours, then minutes                |
//! | >= 1 min, < 1 hour  | minutes, then seconds              |
//! | < 1 minute          | seconds                            |
//!
//! A year is 365 days. Labels take a plural `s` for counts above one, so
//! zero reads `0 sec`.

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Formats `seconds` with at most two units.
///
/// Fractions are truncated; negative and non-finite input reads as zero.
pub fn format_duration(seconds: f64) -> String {
    let total = whole_seconds(seconds);

    if total >= SECONDS_PER_YEAR {
        let days = (total % SECONDS_PER_YEAR) / SECONDS_PER_DAY;
        with_optional(unit(total / SECONDS_PER_YEAR, "yr"), days, "day")
    } else if total >= SECONDS_PER_DAY {
        let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
        with_optional(unit(total / SECONDS_PER_DAY, "day"), hours, "hr")
    } else if total >= SECONDS_PER_HOUR {
        let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        format!("{} {}", unit(total / SECONDS_PER_HOUR, "hr"), unit(minutes, "min"))
    } else if total >= SECONDS_PER_MINUTE {
        let secs = total % SECONDS_PER_MINUTE;
        format!("{} {}", unit(total / SECONDS_PER_MINUTE, "min"), unit(secs, "sec"))
    } else {
        unit(total, "sec")
    }
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    }
}

fn unit(count: u64, label: &str) -> String {
    if count > 1 {
        format!("{count} {label}s")
    } else {
        format!("{count} {label}")
    }
}

fn with_optional(primary: String, count: u64, label: &str) -> String {
    if count == 0 {
        primary
    } else {
        format!("{primary} {}", unit(count, label))
    }
}
