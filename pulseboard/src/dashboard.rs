//! The dashboard model.
//!
//! `DashboardModel` is everything the screen shows. Each panel is optional:
//! a panel disabled in the layout is `None`, and every updater targeting it
//! returns without doing anything. The model also owns the random source
//! used by all updaters, so a seeded model is fully reproducible.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use tracing::trace;

use crate::chart::TrafficChart;
use crate::config::LayoutSettings;
use crate::feed::{ActivityFeed, EntryId};
use crate::metrics::{generate, MetricPanel, MetricSnapshot};
use crate::notify::{NotificationCenter, NotificationId, NotificationKind};
use crate::random::Chance;
use crate::services::{Degradation, ServiceBoard};
use crate::status::StatusDisplay;

/// Model shared between the session's timer tasks and the renderer.
pub type SharedDashboard = Arc<Mutex<DashboardModel>>;

/// Everything shown on screen.
#[derive(Debug)]
pub struct DashboardModel {
    pub metrics: Option<MetricPanel>,
    pub chart: Option<TrafficChart>,
    pub feed: Option<ActivityFeed>,
    pub services: Option<ServiceBoard>,
    pub status: Option<StatusDisplay>,
    pub notifications: NotificationCenter,
    /// Title effect triggered by the Konami code.
    pub rainbow: bool,
    rng: StdRng,
}

impl DashboardModel {
    /// Build a model with the panels enabled in `layout`.
    pub fn new(layout: LayoutSettings, service_names: &[String], rng: StdRng) -> Self {
        Self {
            metrics: layout.metrics.then(MetricPanel::new),
            chart: layout.chart.then(TrafficChart::new),
            feed: layout.activity.then(ActivityFeed::new),
            services: layout
                .services
                .then(|| ServiceBoard::with_names(service_names.iter().cloned())),
            status: layout.status.then(StatusDisplay::default),
            notifications: NotificationCenter::new(),
            rainbow: false,
            rng,
        }
    }

    pub fn into_shared(self) -> SharedDashboard {
        Arc::new(Mutex::new(self))
    }

    /// Draw a fresh metric snapshot and show it.
    ///
    /// Returns the snapshot, or `None` when the metric panel is absent.
    pub fn refresh_metrics(&mut self) -> Option<MetricSnapshot> {
        let Some(panel) = self.metrics.as_mut() else {
            trace!("metric panel absent, skipping refresh");
            return None;
        };
        let snapshot = generate(&mut self.rng);
        panel.apply_snapshot(&snapshot);
        Some(snapshot)
    }

    /// Draw a snapshot without touching the screen (used by exports).
    pub fn sample_metrics(&mut self) -> MetricSnapshot {
        generate(&mut self.rng)
    }

    pub fn clear_metric_highlight(&mut self) {
        if let Some(panel) = self.metrics.as_mut() {
            panel.clear_refreshing();
        }
    }

    /// Assign new random heights to every chart bar.
    pub fn randomize_chart(&mut self) {
        match self.chart.as_mut() {
            Some(chart) => chart.randomize(&mut self.rng),
            None => trace!("chart absent, skipping randomize"),
        }
    }

    pub fn reveal_bar(&mut self, index: usize) {
        if let Some(chart) = self.chart.as_mut() {
            chart.reveal(index);
        }
    }

    /// Maybe append a random activity entry stamped with `time`.
    ///
    /// Returns the new entry's id when the gate passed and the feed exists.
    pub fn update_activity(&mut self, chance: &Chance, time: &str) -> Option<EntryId> {
        let Some(feed) = self.feed.as_mut() else {
            trace!("activity feed absent, skipping update");
            return None;
        };
        if !chance.roll(&mut self.rng) {
            return None;
        }
        Some(feed.push_random(&mut self.rng, time))
    }

    pub fn reveal_activity(&mut self, id: EntryId) {
        if let Some(feed) = self.feed.as_mut() {
            feed.reveal(id);
        }
    }

    /// Maybe degrade a random service.
    pub fn simulate_degradation(&mut self, chance: &Chance) -> Option<Degradation> {
        let Some(board) = self.services.as_mut() else {
            trace!("service board absent, skipping degradation");
            return None;
        };
        if !chance.roll(&mut self.rng) {
            return None;
        }
        board.degrade_random(&mut self.rng)
    }

    pub fn restore_service(&mut self, degradation: &Degradation) {
        if let Some(board) = self.services.as_mut() {
            board.restore(degradation);
        }
    }

    /// Service name to status text; empty when the board is absent.
    pub fn service_statuses(&self) -> BTreeMap<String, String> {
        self.services
            .as_ref()
            .map(ServiceBoard::status_map)
            .unwrap_or_default()
    }

    /// Update the status area, if present.
    pub fn set_status(&mut self, display: StatusDisplay) {
        if let Some(status) = self.status.as_mut() {
            *status = display;
        }
    }

    pub fn push_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationId {
        self.notifications.push(message, kind)
    }
}
