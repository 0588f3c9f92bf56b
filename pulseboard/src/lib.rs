//! Pulseboard - live terminal dashboard
//!
//! This library provides the model and scheduling core behind the Pulseboard
//! dashboard: simulated metrics with counter animations, a traffic chart, a
//! bounded activity feed, service health with transient degradation, a status
//! checker and transient notifications.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DashboardSession                         │
//! │                                                               │
//! │  5s  metrics tick ───────► MetricPanel   (mock generator)     │
//! │  3s  realtime tick ──────► TrafficChart + ActivityFeed        │
//! │  30s degradation tick ───► ServiceBoard  (revert after 5s)    │
//! │  30s status tick ────────► StatusDisplay (StatusClient)       │
//! │  notify() ───────────────► NotificationCenter (5.3s lifetime) │
//! │                                                               │
//! │            all panels live in one DashboardModel              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The terminal front-end lives in the `pulseboard-cli` crate and only reads
//! the model to render it.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod feed;
pub mod logging;
pub mod metrics;
pub mod notify;
pub mod random;
pub mod server;
pub mod services;
pub mod session;
pub mod status;

/// Crate version, shown in the dashboard title and served by the status endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
