//! Status command - run one status check and print the result.

use std::path::Path;

use pulseboard::status::StatusDisplay;

use super::common::{build_runtime, load_config, status_client};
use crate::error::CliError;

/// Query the status endpoint once.
pub fn run(url: Option<String>, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let url = url.unwrap_or(config.dashboard.status_url);

    let runtime = build_runtime()?;
    let result = runtime.block_on(async {
        let client = status_client(&url)?;
        Ok::<_, CliError>(client.fetch_status().await)
    })?;

    println!("{}", StatusDisplay::from_result(&result).text());
    result.map(|_| ()).map_err(CliError::from)
}
