//! Dashboard metrics: identifiers, the metric panel, counter animations and
//! the mock data generator.
//!
//! # Module Structure
//!
//! - `animator` - Counter animation from "0" up to a formatted target
//! - `format` - Display formatting helpers (thousands grouping)
//! - `mock` - Randomized metric snapshots

pub mod animator;
pub mod format;
pub mod mock;

use std::fmt;

pub use animator::{CounterAnimation, CounterFormat, CounterTarget, COUNTER_STEPS, COUNTER_TICK};
pub use mock::{generate, MetricSnapshot};

/// Identifier of a dashboard metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    Performance,
    Users,
    Requests,
    Uptime,
}

impl MetricId {
    /// All metrics in display order.
    pub const ALL: [MetricId; 4] = [
        MetricId::Performance,
        MetricId::Users,
        MetricId::Requests,
        MetricId::Uptime,
    ];

    /// Stable key used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::Performance => "performance-metric",
            MetricId::Users => "users-metric",
            MetricId::Requests => "requests-metric",
            MetricId::Uptime => "uptime-metric",
        }
    }

    /// Card title.
    pub fn label(&self) -> &'static str {
        match self {
            MetricId::Performance => "Performance",
            MetricId::Users => "Active Users",
            MetricId::Requests => "Requests/min",
            MetricId::Uptime => "Uptime",
        }
    }

    /// Value shown before the first refresh.
    pub fn initial_value(&self) -> &'static str {
        match self {
            MetricId::Performance => "98.5%",
            MetricId::Users => "1,247",
            MetricId::Requests => "2.4k",
            MetricId::Uptime => "99.9%",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One metric card on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub id: MetricId,
    /// Text currently displayed (may be an intermediate animation frame).
    pub display: String,
    /// Set briefly after a refresh so the card can be highlighted.
    pub refreshing: bool,
}

/// The row of metric cards.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPanel {
    cards: Vec<MetricCard>,
}

impl MetricPanel {
    /// Panel with every metric at its initial value.
    pub fn new() -> Self {
        let cards = MetricId::ALL
            .iter()
            .map(|&id| MetricCard {
                id,
                display: id.initial_value().to_string(),
                refreshing: false,
            })
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[MetricCard] {
        &self.cards
    }

    pub fn get(&self, id: MetricId) -> Option<&MetricCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Replace the displayed text of one metric.
    pub fn set_display(&mut self, id: MetricId, display: impl Into<String>) {
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
            card.display = display.into();
        }
    }

    /// Apply a fresh snapshot and flag every card as refreshing.
    pub fn apply_snapshot(&mut self, snapshot: &MetricSnapshot) {
        for card in &mut self.cards {
            card.display = snapshot.value(card.id).to_string();
            card.refreshing = true;
        }
    }

    /// Clear the refreshing highlight on every card.
    pub fn clear_refreshing(&mut self) {
        for card in &mut self.cards {
            card.refreshing = false;
        }
    }
}

impl Default for MetricPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_starts_with_initial_values() {
        let panel = MetricPanel::new();
        assert_eq!(panel.cards().len(), 4);
        assert_eq!(panel.get(MetricId::Users).unwrap().display, "1,247");
        assert!(panel.cards().iter().all(|c| !c.refreshing));
    }

    #[test]
    fn test_apply_snapshot_flags_refreshing() {
        let mut panel = MetricPanel::new();
        let snapshot = MetricSnapshot {
            performance: "97.2%".into(),
            users: "1,210".into(),
            requests: "2.7k".into(),
            uptime: "99.8%".into(),
        };

        panel.apply_snapshot(&snapshot);
        assert_eq!(panel.get(MetricId::Requests).unwrap().display, "2.7k");
        assert!(panel.cards().iter().all(|c| c.refreshing));

        panel.clear_refreshing();
        assert!(panel.cards().iter().all(|c| !c.refreshing));
    }

    #[test]
    fn test_initial_values_are_animatable() {
        for id in MetricId::ALL {
            let target = CounterTarget::parse(id.initial_value());
            assert!(target.magnitude() > 0.0, "{} should parse", id);
        }
    }
}
