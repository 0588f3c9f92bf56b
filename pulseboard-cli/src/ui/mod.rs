//! Terminal UI for Pulseboard.
//!
//! Renders the live dashboard: metric cards, traffic chart, service health,
//! activity feed, server status and notification toasts.
//!
//! # Module Structure
//!
//! - `dashboard` - Terminal ownership and screen layout
//! - `widgets` - Reusable UI widget components

pub mod dashboard;
pub mod widgets;

pub use dashboard::Dashboard;
