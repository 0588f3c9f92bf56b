//! Dashboard data export.
//!
//! An export is a pretty-printed JSON document written to
//! `dashboard-data-<unix-ms>.json`:
//!
//! ```json
//! {
//!   "timestamp": "2026-10-16T09:30:00.000Z",
//!   "metrics": { "performance-metric": "97.3%", ... },
//!   "services": { "Database": "Operational", ... }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dashboard::DashboardModel;
use crate::metrics::MetricSnapshot;

/// Delay between the "preparing" notification and the file write.
pub const EXPORT_DELAY: Duration = Duration::from_millis(1500);

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write export file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardExport {
    /// ISO-8601 UTC timestamp with milliseconds.
    pub timestamp: String,
    pub metrics: MetricSnapshot,
    pub services: BTreeMap<String, String>,
}

impl DashboardExport {
    pub fn new(
        now: DateTime<Utc>,
        metrics: MetricSnapshot,
        services: BTreeMap<String, String>,
    ) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            metrics,
            services,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// File name for an export taken at `now`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("dashboard-data-{}.json", now.timestamp_millis())
}

/// Write an export into `dir`, creating the directory if needed.
///
/// Returns the path of the written file.
pub fn write_export(
    dir: &Path,
    export: &DashboardExport,
    now: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(export_file_name(now));
    let json = export.to_json()?;
    fs::write(&path, json).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Sample the model's metrics and services and write them into `dir`.
pub fn export_dashboard(model: &mut DashboardModel, dir: &Path) -> Result<PathBuf, ExportError> {
    let now = Utc::now();
    let export = DashboardExport::new(now, model.sample_metrics(), model.service_statuses());
    write_export(dir, &export, now)
}
