//! Logging for the probe binary.
//!
//! Colored stdout plus a plain log file, initialized at most once per process.

use crate::error::ProbeError;

use common::ErrorLocation;

use std::fmt::Arguments;
use std::io::stdout;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use fern::{Dispatch, FormatCallback};
use humantime::format_rfc3339;
use log::{LevelFilter, Record, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();

static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "studio-probe.log";

#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize stdout + file logging.
///
/// Safe to call more than once: later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns [`ProbeError::Logger`] if the log file cannot be created or a
/// global logger is already installed by someone else.
pub fn initialize(log_dir: &Path, level: LevelFilter) -> Result<(), ProbeError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = file_dispatch(log_dir).and_then(|file| {
            Dispatch::new()
                .level(level)
                .chain(stdout_dispatch())
                .chain(file)
                .apply()
                .map_err(|e| ProbeError::Logger {
                    message: format!("Failed to initialize logger: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                })
        });
        if result.is_ok() {
            info!("Logger initialized with level: {level:?}");
        }
    });

    result
}

/// Parse a level name such as `debug` or `WARN`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

fn stdout_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Dispatch::new()
        .format(move |out, message, record| {
            write_line(out, message, record, colors.color(record.level()))
        })
        .chain(stdout())
}

/// Plain-text dispatch into `{log_dir}/studio-probe.log`.
#[track_caller]
pub(crate) fn file_dispatch(log_dir: &Path) -> Result<Dispatch, ProbeError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let file = fern::log_file(&log_file_path).map_err(|e| ProbeError::Logger {
        message: format!("Failed to create log file {}: {e}", log_file_path.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(Dispatch::new()
        .format(|out, message, record| write_line(out, message, record, record.level()))
        .chain(file))
}

fn write_line(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    level: impl std::fmt::Display,
) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = format_rfc3339(SystemTime::now()),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
