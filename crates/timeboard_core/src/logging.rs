//! Engine logging bootstrap.
//!
//! # Responsibility
//! - Route the engine's `log` events (report builds, rollup cycles, orphaned
//!   contributions) to rotating files for the host process.
//! - Read the host's choice of level and directory from the environment.
//!
//! # Invariants
//! - Only one logger runs per process; asking again with the same config is
//!   a no-op and any other config is rejected, never applied.
//! - Dependencies log at `warn` or quieter; only `timeboard_core` follows the
//!   requested level.
//! - Initialisation never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Absolute directory for log files; logging stays off when unset.
pub const LOG_DIR_ENV: &str = "TIMEBOARD_LOG_DIR";
/// Optional level override; falls back to [`default_log_level`].
pub const LOG_LEVEL_ENV: &str = "TIMEBOARD_LOG_LEVEL";

const ENGINE_MODULE: &str = "timeboard_core";
const LOG_FILE_BASENAME: &str = "timeboard";
const ROTATE_AT_BYTES: u64 = 2 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 4;
const PANIC_NOTE_CHARS: usize = 120;

static RUNNING: OnceCell<RunningLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Logging bootstrap failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    InvalidLevel(String),
    InvalidDir(String),
    /// Directory creation or `flexi_logger` start-up failed.
    Backend(String),
    /// A logger already runs with a different config.
    Reconfigure {
        active: LoggingConfig,
        requested: LoggingConfig,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidDir(reason) => write!(f, "invalid log directory: {reason}"),
            Self::Backend(reason) => write!(f, "failed to start logger: {reason}"),
            Self::Reconfigure { active, requested } => write!(
                f,
                "logger already running with {active}; refusing to switch to {requested}"
            ),
        }
    }
}

impl Error for LoggingError {}

/// Where and how verbosely the engine logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub log_dir: PathBuf,
}

impl LoggingConfig {
    /// Validates a level name and an absolute directory.
    ///
    /// Level names are trimmed and case-insensitive; `warning` is accepted
    /// for `warn`. `off` is rejected since a host that wants no logs simply
    /// does not initialise them.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, LoggingError> {
        Ok(Self {
            level: level_filter(level)?,
            log_dir: absolute_dir(log_dir)?,
        })
    }

    /// Reads [`LOG_DIR_ENV`] and [`LOG_LEVEL_ENV`].
    ///
    /// Returns `Ok(None)` when no directory is configured.
    pub fn from_env() -> Result<Option<Self>, LoggingError> {
        let Some(raw_dir) = std::env::var_os(LOG_DIR_ENV) else {
            return Ok(None);
        };
        let log_dir = raw_dir.into_string().map_err(|raw| {
            LoggingError::InvalidDir(format!(
                "{LOG_DIR_ENV} is not valid UTF-8: {}",
                raw.to_string_lossy()
            ))
        })?;
        let level =
            std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
        Self::new(&level, &log_dir).map(Some)
    }

    fn spec(&self) -> LogSpecification {
        LogSpecification::builder()
            .default(self.level.min(LevelFilter::Warn))
            .module(ENGINE_MODULE, self.level)
            .build()
    }
}

impl Display for LoggingConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "level={} dir={}",
            level_name(self.level),
            self.log_dir.display()
        )
    }
}

struct RunningLogger {
    config: LoggingConfig,
    _handle: LoggerHandle,
}

impl RunningLogger {
    fn start(config: LoggingConfig) -> Result<Self, LoggingError> {
        std::fs::create_dir_all(&config.log_dir).map_err(|err| {
            LoggingError::Backend(format!("cannot create `{}`: {err}", config.log_dir.display()))
        })?;

        let handle = Logger::with(config.spec())
            .log_to_file(
                FileSpec::default()
                    .directory(config.log_dir.clone())
                    .basename(LOG_FILE_BASENAME)
                    .suppress_timestamp(),
            )
            .rotate(
                Criterion::Size(ROTATE_AT_BYTES),
                Naming::Timestamps,
                Cleanup::KeepLogFiles(KEPT_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::with_thread)
            .start()
            .map_err(|err| LoggingError::Backend(err.to_string()))?;

        install_panic_hook();
        info!(
            "event=logging_start module=logging status=ok version={} {}",
            env!("CARGO_PKG_VERSION"),
            config
        );

        Ok(Self {
            config,
            _handle: handle,
        })
    }

    fn accepts(&self, requested: &LoggingConfig) -> Result<(), LoggingError> {
        if self.config == *requested {
            Ok(())
        } else {
            Err(LoggingError::Reconfigure {
                active: self.config.clone(),
                requested: requested.clone(),
            })
        }
    }
}

/// Starts file logging for the process hosting the engine.
///
/// # Errors
/// - `Backend` when the directory or logger cannot be set up.
/// - `Reconfigure` when a logger already runs with another config.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    RUNNING
        .get_or_try_init(|| RunningLogger::start(config.clone()))?
        .accepts(config)
}

/// Config of the running logger, if one was started.
pub fn logging_status() -> Option<LoggingConfig> {
    RUNNING.get().map(|running| running.config.clone())
}

/// `debug` in debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn level_filter(level: &str) -> Result<LevelFilter, LoggingError> {
    let normalized = level.trim().to_ascii_lowercase();
    let name = if normalized == "warning" {
        "warn"
    } else {
        normalized.as_str()
    };
    match LevelFilter::from_str(name) {
        Ok(LevelFilter::Off) | Err(_) => Err(LoggingError::InvalidLevel(level.trim().to_string())),
        Ok(filter) => Ok(filter),
    }
}

fn level_name(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

fn absolute_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    let path = Path::new(log_dir.trim());
    if path.as_os_str().is_empty() {
        Err(LoggingError::InvalidDir("empty path".to_string()))
    } else if path.is_relative() {
        Err(LoggingError::InvalidDir(format!(
            "`{}` is not absolute",
            path.display()
        )))
    } else {
        Ok(path.to_path_buf())
    }
}

fn install_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let chained = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let payload = info.payload();
            let note = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("opaque payload");
            let location = info.location().map_or_else(
                || "unknown".to_string(),
                |location| format!("{}:{}", location.file(), location.line()),
            );
            let thread = std::thread::current();
            error!(
                "event=engine_panic module=logging status=error thread={} location={} note={}",
                thread.name().unwrap_or("unnamed"),
                location,
                panic_note(note)
            );
            chained(info);
        }));
    });
}

/// Panic text as one bounded line; control characters become spaces.
fn panic_note(note: &str) -> String {
    let mut line: String = note
        .chars()
        .take(PANIC_NOTE_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    if note.chars().nth(PANIC_NOTE_CHARS).is_some() {
        line.push_str("...");
    }
    line
}
