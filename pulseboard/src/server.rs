//! Local status endpoint.
//!
//! Serves `GET /api/status` with the document the status checker expects,
//! so a dashboard can be pointed at a live endpoint during development.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Path of the status endpoint.
pub const STATUS_PATH: &str = "/api/status";

/// Status endpoint response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub message: &'static str,
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        version: crate::VERSION,
        message: "System operational",
    })
}

/// Router exposing the status endpoint.
pub fn status_router() -> Router {
    Router::new().route(STATUS_PATH, get(status))
}

/// Serve the status endpoint until `cancel` fires.
pub async fn serve(listener: TcpListener, cancel: CancellationToken) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, path = STATUS_PATH, "Status server listening");
    }

    axum::serve(listener, status_router())
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;

    info!("Status server stopped");
    Ok(())
}
