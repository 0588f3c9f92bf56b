//! Export command - write one snapshot of simulated dashboard data.

use std::path::{Path, PathBuf};

use pulseboard::dashboard::DashboardModel;
use pulseboard::export::export_dashboard;
use pulseboard::random::rng_from_seed;

use super::common::load_config;
use crate::error::CliError;

/// Write an export file and print its path.
pub fn run(output: Option<PathBuf>, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let dir = output.unwrap_or_else(|| config.dashboard.export_dir.clone());

    let path = export_snapshot(&dir, &config.services, config.dashboard.seed)?;
    println!("Data exported to {}", path.display());
    Ok(())
}

fn export_snapshot(
    dir: &Path,
    services: &[String],
    seed: Option<u64>,
) -> Result<PathBuf, CliError> {
    let mut model = DashboardModel::new(Default::default(), services, rng_from_seed(seed));
    Ok(export_dashboard(&mut model, dir)?)
}
