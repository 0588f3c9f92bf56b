//! CLI error type.

use std::fmt;

use pulseboard::config::ConfigError;
use pulseboard::export::ExportError;
use pulseboard::logging::LoggingError;
use pulseboard::status::StatusError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    Config(String),
    Logging(LoggingError),
    Status(StatusError),
    Export(ExportError),
    Terminal(std::io::Error),
    Runtime(std::io::Error),
    Server(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Status(e) => write!(f, "Status check failed: {}", e),
            CliError::Export(e) => write!(f, "Export failed: {}", e),
            CliError::Terminal(e) => write!(f, "Terminal error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Server(e) => write!(f, "Status server error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::Logging(e) => Some(e),
            CliError::Status(e) => Some(e),
            CliError::Export(e) => Some(e),
            CliError::Terminal(e) | CliError::Runtime(e) | CliError::Server(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<StatusError> for CliError {
    fn from(e: StatusError) -> Self {
        CliError::Status(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err: CliError = ConfigError::InvalidProbability(2.0).into();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_status_error_keeps_source() {
        let err: CliError = StatusError::Request("refused".into()).into();
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), format!("Status check failed: {}", StatusError::Request("refused".into())));
    }
}
