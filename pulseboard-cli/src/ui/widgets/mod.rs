//! Dashboard widgets for the TUI.

mod activity;
mod metrics;
mod services;
mod status;
mod toasts;
mod traffic;

pub use activity::ActivityWidget;
pub use metrics::MetricsWidget;
pub use services::ServicesWidget;
pub use status::StatusWidget;
pub use toasts::ToastsWidget;
pub use traffic::TrafficWidget;

/// Flatten a buffer into one string, row by row.
#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    buf.content.iter().map(|cell| cell.symbol()).collect()
}
