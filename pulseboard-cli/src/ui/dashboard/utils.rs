//! Utility functions for the dashboard.
//!
//! This module contains formatting helpers and non-TUI output functions
//! that can be used independently of the terminal UI.

use std::time::Duration;

use pulseboard::dashboard::DashboardModel;
use pulseboard::metrics::MetricId;
use pulseboard::services::ServiceLevel;

/// Format duration as HH:MM:SS or MM:SS.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// One-line summary of the model for non-interactive output.
pub fn status_line(model: &DashboardModel, uptime: Duration) -> String {
    let mut parts = Vec::new();

    if let Some(panel) = model.metrics.as_ref() {
        let metrics: Vec<String> = MetricId::ALL
            .iter()
            .filter_map(|id| panel.get(*id))
            .map(|card| format!("{} {}", card.id.label(), card.display))
            .collect();
        parts.push(metrics.join(", "));
    }

    if let Some(board) = model.services.as_ref() {
        let healthy = board
            .services()
            .iter()
            .filter(|s| s.level == ServiceLevel::Ok)
            .count();
        parts.push(format!("Services: {}/{} operational", healthy, board.len()));
    }

    if let Some(feed) = model.feed.as_ref() {
        if let Some(latest) = feed.iter().next() {
            parts.push(format!("Latest: {} {}", latest.time, latest.message));
        }
    }

    if let Some(status) = model.status.as_ref() {
        parts.push(format!("Server: {}", status.text()));
    }

    format!("[{}] {}", format_duration(uptime), parts.join(" | "))
}

/// Simple non-TUI fallback for non-interactive terminals.
pub fn print_simple_status(model: &DashboardModel, uptime: Duration) {
    println!("{}", status_line(model, uptime));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulseboard::config::LayoutSettings;
    use pulseboard::random::rng_from_seed;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(75)), "01:15");
        assert_eq!(format_duration(Duration::from_secs(3_725)), "01:02:05");
    }

    #[test]
    fn test_status_line() {
        let names = vec!["Database".to_string(), "Cache Layer".to_string()];
        let mut model = DashboardModel::new(LayoutSettings::default(), &names, rng_from_seed(Some(1)));
        model.services.as_mut().unwrap().degrade(0);

        let line = status_line(&model, Duration::from_secs(30));
        assert!(line.starts_with("[00:30]"));
        assert!(line.contains("Performance 98.5%"));
        assert!(line.contains("Services: 1/2 operational"));
        assert!(line.contains("Server: Waiting for first status check..."));
    }
}
