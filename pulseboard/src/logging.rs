//! Logging setup.
//!
//! The dashboard owns the terminal, so log output goes to a daily-rolling
//! file (`pulseboard.log.<date>`) through a non-blocking writer. `RUST_LOG`
//! overrides the configured level.

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log file name prefix.
pub const LOG_FILE_PREFIX: &str = "pulseboard.log";

/// Errors from logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory: {0}")]
    CreateDir(#[from] std::io::Error),

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Keeps the background log writer alive; drop it at shutdown to flush.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Build the filter from `RUST_LOG`, or from `level` when unset.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
            filter: level.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Install the global subscriber writing to `directory`.
pub fn init_logging(directory: &Path, level: &str) -> Result<LoggingGuard, LoggingError> {
    std::fs::create_dir_all(directory)?;

    let filter = build_filter(level)?;
    let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_timer(LocalTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        version = crate::VERSION,
        directory = %directory.display(),
        "Logging initialized"
    );

    Ok(LoggingGuard { _guard: guard })
}
