//! Pulseboard CLI - Command-line interface
//!
//! This binary runs the Pulseboard live dashboard in the terminal and
//! provides helper commands around it.

mod commands;
mod error;
mod events;
mod tui_app;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::run::RunArgs;
use commands::serve::ServeArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(about = "Live terminal dashboard with simulated metrics and service health", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (default: ~/.pulseboard/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live dashboard (default)
    Run(RunArgs),

    /// Write a snapshot of dashboard data to a JSON file
    Export {
        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check the status endpoint once
    Status {
        /// Status endpoint URL (overrides config)
        #[arg(long)]
        url: Option<String>,
    },

    /// Serve a local status endpoint
    Serve(ServeArgs),

    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => commands::run::run(args, config_path),
        Commands::Export { output } => commands::export::run(output, config_path),
        Commands::Status { url } => commands::status::run(url, config_path),
        Commands::Serve(args) => commands::serve::run(args),
        Commands::Config { command } => commands::config::run(command, config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_is_default() {
        let cli = Cli::try_parse_from(["pulseboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["pulseboard", "serve"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, 5001);
                assert_eq!(args.bind, "127.0.0.1");
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["pulseboard", "config", "path", "--config", "/tmp/p.ini"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.ini")));
    }
}
