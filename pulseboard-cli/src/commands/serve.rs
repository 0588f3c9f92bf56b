//! Serve command - run the local status endpoint.

use std::net::SocketAddr;

use clap::Args;
use tokio_util::sync::CancellationToken;

use super::common::build_runtime;
use crate::error::CliError;

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value_t = 5001)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,
}

/// Serve `GET /api/status` until Ctrl+C.
pub fn run(args: ServeArgs) -> Result<(), CliError> {
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .map_err(|e| CliError::Config(format!("Invalid bind address '{}': {}", args.bind, e)))?;

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    ctrlc::set_handler(move || cancel_clone.cancel())
        .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let runtime = build_runtime()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(CliError::Server)?;

        println!(
            "Serving http://{}{} (Ctrl+C to stop)",
            addr,
            pulseboard::server::STATUS_PATH
        );
        pulseboard::server::serve(listener, cancel)
            .await
            .map_err(CliError::Server)
    })
}
