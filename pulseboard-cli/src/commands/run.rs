//! Run command - show the live dashboard.

use std::path::{Path, PathBuf};

use clap::Args;
use pulseboard::config::ConfigFile;
use pulseboard::session::{DashboardSession, SessionConfig};

use super::common::{build_runtime, load_config, start_logging, status_client};
use crate::error::CliError;
use crate::tui_app::{run_headless, run_tui};

/// Arguments for the run command.
#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Status endpoint URL (overrides config)
    #[arg(long)]
    pub status_url: Option<String>,

    /// Directory for exported data (overrides config)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Seed for reproducible simulated data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print periodic status lines instead of the terminal UI
    #[arg(long)]
    pub headless: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut ConfigFile) {
        if let Some(url) = &self.status_url {
            config.dashboard.status_url = url.clone();
        }
        if let Some(dir) = &self.export_dir {
            config.dashboard.export_dir = dir.clone();
        }
        if self.seed.is_some() {
            config.dashboard.seed = self.seed;
        }
    }
}

/// Run the dashboard until the user quits.
pub fn run(args: RunArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let mut config = load_config(config_path)?;
    args.apply(&mut config);

    let _logging = start_logging(&config, "run")?;
    let session_config = SessionConfig::from_config_file(&config)?;
    let runtime = build_runtime()?;

    let mut session = {
        let _enter = runtime.enter();
        let client = status_client(&config.dashboard.status_url)?;
        DashboardSession::new(session_config, client)
    };

    let headless = args.headless || !atty::is(atty::Stream::Stdout);
    let result = {
        let _enter = runtime.enter();
        session.start();
        if headless {
            run_headless(&session)
        } else {
            run_tui(&session)
        }
    };

    runtime.block_on(session.stop());
    result
}
