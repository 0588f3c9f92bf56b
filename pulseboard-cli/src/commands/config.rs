//! Configuration management CLI commands.
//!
//! Provides `config path`, `config list` and `config init` for viewing and
//! creating the configuration file.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use pulseboard::config::{config_file_path, ConfigFile};

use super::common::load_config;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// List all configuration settings (file values merged over defaults)
    List,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);

    match command {
        ConfigCommands::Path => run_path(&path),
        ConfigCommands::List => run_list(&path),
        ConfigCommands::Init { force } => run_init(&path, force).map(|written| {
            println!("Wrote {}", written.display());
        }),
    }
}

/// Show the configuration file path.
fn run_path(path: &Path) -> Result<(), CliError> {
    println!("{}", path.display());
    Ok(())
}

/// List all configuration settings.
fn run_list(path: &Path) -> Result<(), CliError> {
    let config = load_config(Some(path))?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "# {}", path.display()).map_err(CliError::Terminal)?;
    config.to_ini().write_to(&mut out).map_err(CliError::Terminal)
}

/// Write defaults to `path`, refusing to overwrite unless forced.
fn run_init(path: &Path, force: bool) -> Result<PathBuf, CliError> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }
    ConfigFile::default().save_to(path)?;
    Ok(path.to_path_buf())
}
