//! Status checking against the `/api/status` endpoint.
//!
//! The checker asks a [`StatusClient`] for a [`StatusReport`] and turns the
//! outcome into a [`StatusDisplay`]. Every failure (transport error, non-2xx
//! response, undecodable body) collapses into the same
//! [`StatusDisplay::Unreachable`] state.

mod client;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::{ReqwestStatusClient, StatusClient, StatusFuture};

/// Default status endpoint.
pub const DEFAULT_STATUS_URL: &str = "http://127.0.0.1:5001/api/status";

/// Delay after session start before the first check.
pub const STATUS_INITIAL_DELAY: Duration = Duration::from_secs(2);

/// Interval between periodic checks.
pub const STATUS_INTERVAL: Duration = Duration::from_secs(30);

/// Message shown whenever a check fails.
pub const CONNECTION_ERROR_MESSAGE: &str = "Unable to connect to the server";

/// Body returned by a healthy status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub message: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Errors from a status check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusError {
    /// The request could not be sent or no response arrived.
    #[error("Request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The response body was not a valid status report.
    #[error("Invalid status body: {0}")]
    Decode(String),
}

/// What the status area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusDisplay {
    /// No check has run yet.
    #[default]
    Idle,
    /// A check is in flight.
    Checking,
    /// The last check succeeded.
    Online { message: String, version: String },
    /// The last check failed.
    Unreachable,
}

impl StatusDisplay {
    /// Display state for a finished check.
    pub fn from_result(result: &Result<StatusReport, StatusError>) -> Self {
        match result {
            Ok(report) => StatusDisplay::Online {
                message: report.message.clone(),
                version: report.version.clone(),
            },
            Err(_) => StatusDisplay::Unreachable,
        }
    }

    /// Text of the status area.
    pub fn text(&self) -> String {
        match self {
            StatusDisplay::Idle => "Waiting for first status check...".to_string(),
            StatusDisplay::Checking => "Checking status...".to_string(),
            StatusDisplay::Online { message, version } => format!("{} - v{}", message, version),
            StatusDisplay::Unreachable => CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, StatusDisplay::Online { .. })
    }
}
