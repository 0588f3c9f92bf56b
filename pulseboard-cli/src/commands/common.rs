//! Common types and utilities shared across CLI commands.

use std::path::Path;
use std::sync::Arc;

use pulseboard::config::ConfigFile;
use pulseboard::logging::{init_logging, LoggingGuard};
use pulseboard::status::{ReqwestStatusClient, StatusClient};
use tokio::runtime::Runtime;

use crate::error::CliError;

/// Load the configuration from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Start file logging as configured. Keep the guard alive until exit.
pub fn start_logging(config: &ConfigFile, command: &str) -> Result<LoggingGuard, CliError> {
    let guard = init_logging(&config.logging.directory, &config.logging.level)?;
    tracing::info!(
        command,
        version = pulseboard::VERSION,
        "Pulseboard starting"
    );
    Ok(guard)
}

/// Runtime hosting the session's timers on a single worker thread.
pub fn build_runtime() -> Result<Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("pulseboard-timers")
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

/// HTTP status client for `url`.
pub fn status_client(url: &str) -> Result<Arc<dyn StatusClient>, CliError> {
    Ok(Arc::new(ReqwestStatusClient::new(url)?))
}
