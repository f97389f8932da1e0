//! Logging infrastructure for mntools
//!
//! Stdout carries the dump listing and the line totals, so logs never go
//! there. They are written to `~/.local/state/mntools/mntools.log`; when that
//! directory cannot be created the tools log to stderr instead of running
//! without logs.

use crate::config::{Config, LoggingConfig};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// File name prefix of the rolling log
const LOG_FILE_NAME: &str = "mntools.log";

/// Where log records end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Daily-rotated files in this directory
    File(PathBuf),
    /// Standard error, used when the state directory is unusable
    Stderr,
}

/// Pick the destination for `state_dir`, creating it if needed.
///
/// Returns the creation error alongside [`LogDestination::Stderr`] so the
/// caller can report it once logging is up.
pub fn resolve_destination(state_dir: &Path) -> (LogDestination, Option<std::io::Error>) {
    match std::fs::create_dir_all(state_dir) {
        Ok(()) => (LogDestination::File(state_dir.to_path_buf()), None),
        Err(e) => (LogDestination::Stderr, Some(e)),
    }
}

/// Initialize the logging system
///
/// `RUST_LOG` overrides the configured level. Safe to call more than once;
/// only the first call installs a subscriber.
pub fn init(config: &LoggingConfig) -> LoggingGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let state_dir = Config::state_dir();
    let (destination, dir_error) = resolve_destination(&state_dir);

    let worker_guard = match &destination {
        LogDestination::File(dir) => {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
            Some(guard)
        }
        LogDestination::Stderr => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
            None
        }
    };

    if let Some(e) = dir_error {
        tracing::warn!(
            state_dir = %state_dir.display(),
            error = %e,
            "Cannot create log directory, logging to stderr"
        );
    }
    tracing::info!(destination = ?destination, level = %config.level, "Logging initialized");

    LoggingGuard {
        destination,
        _guard: worker_guard,
    }
}

/// Initialize logging for tests (logs to the test writer)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Guard that keeps the logging system alive
///
/// When dropped, flushes any pending file writes.
pub struct LoggingGuard {
    destination: LogDestination,
    _guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Where this run is logging
    pub fn destination(&self) -> &LogDestination {
        &self.destination
    }
}
