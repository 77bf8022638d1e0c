//! CLI smoke and report entry point.
//!
//! # Responsibility
//! - Verify `timeboard_core` linkage with deterministic output.
//! - Print a root-level report for a JSON snapshot when one is given.
//! - Start engine file logging when `TIMEBOARD_LOG_DIR` is set.
//!
//! Usage: `timeboard_cli [snapshot.json [today|week|month|year|all]]`

use std::process::ExitCode;
use timeboard_core::{
    init_logging, LoggingConfig, ReportRequest, ReportService, TimeRange, TrackingSnapshot,
};

fn main() -> ExitCode {
    println!("timeboard_core ping={}", timeboard_core::ping());
    println!("timeboard_core version={}", timeboard_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let range = args.next().unwrap_or_else(|| TimeRange::Week.to_string());

    start_logging();
    match print_report(&snapshot_path, &range) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Logging problems are reported but never block the report.
fn start_logging() {
    let outcome = LoggingConfig::from_env().and_then(|config| match config {
        Some(config) => init_logging(&config).map(|()| Some(config)),
        None => Ok(None),
    });
    match outcome {
        Ok(Some(config)) => println!("logging {config}"),
        Ok(None) => {}
        Err(err) => eprintln!("warning: {err}"),
    }
}

fn print_report(snapshot_path: &str, range: &str) -> Result<(), String> {
    let range = range.parse::<TimeRange>().map_err(|err| err.to_string())?;
    let raw = std::fs::read_to_string(snapshot_path)
        .map_err(|err| format!("failed to read `{snapshot_path}`: {err}"))?;
    let snapshot: TrackingSnapshot = serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse `{snapshot_path}`: {err}"))?;

    let now = chrono::Utc::now().timestamp_millis();
    let report = ReportService::new(snapshot)
        .build_report(&ReportRequest::new(range, now))
        .map_err(|err| err.to_string())?;

    println!(
        "range={} window_start={} window_end={} total={}",
        range,
        report.window.start,
        report.window.end,
        timeboard_core::format_duration(report.visible_total)
    );
    for row in &report.rows {
        println!(
            "{:>3}% {:<24} {}",
            row.share_pct, row.name, row.duration_label
        );
    }
    if let Some(elapsed) = report.running_elapsed_seconds {
        println!("running {}", timeboard_core::format_duration(elapsed));
    }
    Ok(())
}
