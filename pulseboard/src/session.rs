//! Dashboard session: the update scheduler.
//!
//! A [`DashboardSession`] owns the shared [`DashboardModel`] and every timer
//! that mutates it. `start()` launches the repeating ticks; `stop()` cancels
//! them and waits until each task has exited.
//!
//! # Timers
//!
//! ```text
//! t=0      counter animations (200ms stagger), chart reveal (100ms stagger)
//! t=2s     first status check, then every 30s from start
//! every 5s metric refresh (highlight cleared 300ms later)
//! every 3s chart randomize + activity update (30% gate, reveal after 100ms)
//! t=10s    degradation ticks begin, every 30s (10% gate, revert after 5s)
//! ```
//!
//! Ticks are independent and never phase-aligned. All model mutations happen
//! under the model lock, which is never held across an `.await`.
//!
//! All methods that schedule work must be called from within a Tokio runtime.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, trace, warn};

use crate::chart::TrafficChart;
use crate::config::{ConfigError, ConfigFile, LayoutSettings};
use crate::dashboard::{DashboardModel, SharedDashboard};
use crate::export::{export_dashboard, ExportError, EXPORT_DELAY};
use crate::feed::clock_label;
use crate::metrics::animator::COUNTER_START_TEXT;
use crate::metrics::{CounterAnimation, MetricId, COUNTER_TICK};
use crate::notify::{
    NotificationId, NotificationKind, NOTIFICATION_ENTER_DELAY, NOTIFICATION_FADE,
    NOTIFICATION_LIFETIME,
};
use crate::random::{rng_from_seed, Chance};
use crate::services::{DEGRADATION_DURATION, DEFAULT_SERVICES};
use crate::status::{StatusClient, StatusDisplay};

// =============================================================================
// Configuration
// =============================================================================

/// Delay between the start of consecutive counter animations.
pub const METRIC_ANIMATION_STAGGER: Duration = Duration::from_millis(200);

/// How long refreshed metric cards stay highlighted.
pub const METRIC_HIGHLIGHT: Duration = Duration::from_millis(300);

/// Delay before a new activity entry slides in.
pub const ACTIVITY_REVEAL_DELAY: Duration = Duration::from_millis(100);

/// Delay before the follow-up toast of the clear-cache action.
pub const CLEAR_CACHE_FOLLOWUP: Duration = Duration::from_secs(2);

/// Spacing between system check steps.
pub const SYSTEM_CHECK_STEP: Duration = Duration::from_secs(1);

/// Duration of the rainbow title effect.
pub const RAINBOW_DURATION: Duration = Duration::from_secs(2);

/// Steps announced by the system check action.
pub const SYSTEM_CHECK_STEPS: [&str; 4] = [
    "Checking connectivity...",
    "Testing performance...",
    "Validating security...",
    "Checking data integrity...",
];

/// Intervals and delays of the session's timers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTimings {
    pub metrics_interval: Duration,
    pub realtime_interval: Duration,
    pub degradation_delay: Duration,
    pub degradation_interval: Duration,
    pub status_initial_delay: Duration,
    pub status_interval: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            metrics_interval: Duration::from_secs(5),
            realtime_interval: Duration::from_secs(3),
            degradation_delay: Duration::from_secs(10),
            degradation_interval: Duration::from_secs(30),
            status_initial_delay: crate::status::STATUS_INITIAL_DELAY,
            status_interval: crate::status::STATUS_INTERVAL,
        }
    }
}

/// Everything needed to run a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub timings: SessionTimings,
    pub activity_chance: Chance,
    pub degradation_chance: Chance,
    pub layout: LayoutSettings,
    pub services: Vec<String>,
    pub export_dir: PathBuf,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let defaults = ConfigFile::default();
        Self {
            timings: SessionTimings::default(),
            activity_chance: Chance::new(defaults.schedule.activity_chance)
                .unwrap_or_else(|_| Chance::never()),
            degradation_chance: Chance::new(defaults.schedule.degradation_chance)
                .unwrap_or_else(|_| Chance::never()),
            layout: LayoutSettings::default(),
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            export_dir: defaults.dashboard.export_dir,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Build from a loaded configuration file.
    ///
    /// Rejects zero-length intervals and probabilities outside `[0, 1]`.
    pub fn from_config_file(config: &ConfigFile) -> Result<Self, ConfigError> {
        let s = &config.schedule;
        let timings = SessionTimings {
            metrics_interval: non_zero("schedule.metrics_interval_ms", s.metrics_interval_ms)?,
            realtime_interval: non_zero("schedule.realtime_interval_ms", s.realtime_interval_ms)?,
            degradation_delay: Duration::from_millis(s.degradation_delay_ms),
            degradation_interval: non_zero(
                "schedule.degradation_interval_ms",
                s.degradation_interval_ms,
            )?,
            status_initial_delay: Duration::from_millis(s.status_initial_delay_ms),
            status_interval: non_zero("schedule.status_interval_ms", s.status_interval_ms)?,
        };

        Ok(Self {
            timings,
            activity_chance: Chance::new(s.activity_chance)?,
            degradation_chance: Chance::new(s.degradation_chance)?,
            layout: config.layout,
            services: config.services.clone(),
            export_dir: config.dashboard.export_dir.clone(),
            seed: config.dashboard.seed,
        })
    }
}

fn non_zero(key: &str, ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: ms.to_string(),
        });
    }
    Ok(Duration::from_millis(ms))
}

/// Network connectivity change reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

/// Shared handles cloned into every task.
#[derive(Clone)]
struct SessionContext {
    model: SharedDashboard,
    config: Arc<SessionConfig>,
    status_client: Arc<dyn StatusClient>,
    cancel: CancellationToken,
    tracker: TaskTracker,
}

/// A running dashboard and all of its timers.
pub struct DashboardSession {
    ctx: SessionContext,
    lifecycle: Lifecycle,
}

impl DashboardSession {
    /// Create a session. Nothing is scheduled until [`start`](Self::start).
    pub fn new(config: SessionConfig, status_client: Arc<dyn StatusClient>) -> Self {
        let model = DashboardModel::new(config.layout, &config.services, rng_from_seed(config.seed))
            .into_shared();

        Self {
            ctx: SessionContext {
                model,
                config: Arc::new(config),
                status_client,
                cancel: CancellationToken::new(),
                tracker: TaskTracker::new(),
            },
            lifecycle: Lifecycle::Idle,
        }
    }

    /// Shared handle to the model.
    pub fn model(&self) -> SharedDashboard {
        Arc::clone(&self.ctx.model)
    }

    /// Run `f` with the model locked.
    pub fn with_model<R>(&self, f: impl FnOnce(&DashboardModel) -> R) -> R {
        f(&self.ctx.model.lock())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.ctx.config
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Launch every timer.
    ///
    /// Starting twice, or after `stop`, is ignored.
    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Idle {
            warn!(state = ?self.lifecycle, "Session start ignored");
            return;
        }
        self.lifecycle = Lifecycle::Running;

        let ctx = &self.ctx;
        let timings = ctx.config.timings.clone();
        info!(
            metrics_ms = timings.metrics_interval.as_millis() as u64,
            realtime_ms = timings.realtime_interval.as_millis() as u64,
            degradation_ms = timings.degradation_interval.as_millis() as u64,
            status_ms = timings.status_interval.as_millis() as u64,
            "Dashboard session starting"
        );

        ctx.start_counter_animations();
        ctx.start_chart_reveal();

        ctx.spawn_interval(
            timings.metrics_interval,
            timings.metrics_interval,
            |ctx| ctx.refresh_metrics(),
        );

        ctx.spawn_interval(
            timings.realtime_interval,
            timings.realtime_interval,
            |ctx| ctx.realtime_tick(),
        );

        ctx.spawn_interval(
            timings.degradation_delay + timings.degradation_interval,
            timings.degradation_interval,
            |ctx| ctx.degradation_tick(),
        );

        let first_check = ctx.clone();
        ctx.spawn_after(timings.status_initial_delay, async move {
            first_check.check_status().await;
        });
        ctx.spawn_interval(
            timings.status_interval,
            timings.status_interval,
            |ctx| ctx.spawn_status_check(),
        );
    }

    /// Cancel every timer and wait for all tasks to finish.
    pub async fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;

        self.ctx.cancel.cancel();
        self.ctx.tracker.close();
        self.ctx.tracker.wait().await;
        info!("Dashboard session stopped");
    }

    /// Show a toast; it is removed automatically.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.ctx.notify(message, kind)
    }

    /// Refresh action: toast plus an immediate metric refresh.
    pub fn refresh_metrics(&self) {
        self.ctx
            .notify("Metrics refreshed successfully", NotificationKind::Success);
        self.ctx.refresh_metrics();
    }

    /// Clear-cache action.
    pub fn clear_cache(&self) {
        self.ctx.notify("Cache cleared", NotificationKind::Info);
        let ctx = self.ctx.clone();
        self.ctx.spawn_after(CLEAR_CACHE_FOLLOWUP, async move {
            ctx.notify(
                "Performance optimized after cleanup",
                NotificationKind::Success,
            );
        });
    }

    /// Export action: announce, then write the file after [`EXPORT_DELAY`].
    pub fn export_data(&self) {
        self.ctx
            .notify("Preparing data export...", NotificationKind::Info);
        let ctx = self.ctx.clone();
        self.ctx.spawn_after(EXPORT_DELAY, async move {
            match ctx.export_now() {
                Ok(path) => {
                    info!(path = %path.display(), "Dashboard data exported");
                    ctx.notify("Data exported successfully", NotificationKind::Success);
                }
                Err(e) => {
                    warn!(error = %e, "Dashboard export failed");
                    ctx.notify(format!("Export failed: {}", e), NotificationKind::Error);
                }
            }
        });
    }

    /// Write an export immediately, without notifications.
    pub fn export_now(&self) -> Result<PathBuf, ExportError> {
        self.ctx.export_now()
    }

    /// System check action: a toast per step, one second apart.
    pub fn system_check(&self) {
        self.ctx
            .notify("Starting system check...", NotificationKind::Info);

        for (index, step) in SYSTEM_CHECK_STEPS.into_iter().enumerate() {
            let ctx = self.ctx.clone();
            self.ctx
                .spawn_after(SYSTEM_CHECK_STEP * index as u32, async move {
                    ctx.notify(step, NotificationKind::Info);
                });
        }

        let ctx = self.ctx.clone();
        let done_after = SYSTEM_CHECK_STEP * SYSTEM_CHECK_STEPS.len() as u32;
        self.ctx.spawn_after(done_after, async move {
            ctx.notify(
                "System check complete - everything is working!",
                NotificationKind::Success,
            );
        });
    }

    /// React to connectivity changes; regaining it triggers a status check.
    pub fn connectivity_changed(&self, connectivity: Connectivity) {
        match connectivity {
            Connectivity::Online => {
                self.ctx
                    .notify("Connection restored", NotificationKind::Success);
                self.ctx.spawn_status_check();
            }
            Connectivity::Offline => {
                self.ctx
                    .notify("Offline mode enabled", NotificationKind::Warning);
            }
        }
    }

    /// Run a status check now.
    pub fn check_status(&self) {
        self.ctx.spawn_status_check();
    }

    /// Konami code reward.
    pub fn celebrate(&self) {
        self.ctx.notify(
            "🎮 Konami code activated! You found the easter egg!",
            NotificationKind::Success,
        );
        self.ctx.model.lock().rainbow = true;

        let model = Arc::clone(&self.ctx.model);
        self.ctx.spawn_after(RAINBOW_DURATION, async move {
            model.lock().rainbow = false;
        });
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.ctx.cancel.cancel();
    }
}

impl SessionContext {
    /// Spawn a task that ends early when the session is cancelled.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = fut => {}
            }
        });
    }

    fn spawn_after<F>(&self, delay: Duration, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.spawn(async move {
            sleep(delay).await;
            fut.await;
        });
    }

    /// Run `tick` first after `first`, then every `period`.
    fn spawn_interval<F>(&self, first: Duration, period: Duration, mut tick: F)
    where
        F: FnMut(&SessionContext) + Send + 'static,
    {
        let ctx = self.clone();
        self.spawn(async move {
            let mut interval = interval_at(Instant::now() + first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick(&ctx);
            }
        });
    }

    fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let message = message.into();
        debug!(kind = %kind, message = %message, "Notification");
        let id = self.model.lock().push_notification(message, kind);

        let model = Arc::clone(&self.model);
        self.spawn(async move {
            sleep(NOTIFICATION_ENTER_DELAY).await;
            model.lock().notifications.show(id);

            sleep(NOTIFICATION_LIFETIME - NOTIFICATION_ENTER_DELAY).await;
            model.lock().notifications.begin_dismiss(id);

            sleep(NOTIFICATION_FADE).await;
            model.lock().notifications.remove(id);
        });
        id
    }

    /// Zero every metric card, then count each up to its value.
    fn start_counter_animations(&self) {
        let targets: Vec<(MetricId, String)> = {
            let mut model = self.model.lock();
            let Some(panel) = model.metrics.as_mut() else {
                return;
            };
            let targets: Vec<(MetricId, String)> = panel
                .cards()
                .iter()
                .map(|c| (c.id, c.display.clone()))
                .collect();
            for id in MetricId::ALL {
                panel.set_display(id, COUNTER_START_TEXT);
            }
            targets
        };

        for (index, (id, target)) in targets.into_iter().enumerate() {
            let model = Arc::clone(&self.model);
            self.spawn_after(METRIC_ANIMATION_STAGGER * index as u32, async move {
                let frames = CounterAnimation::new(&target);
                let mut ticker = interval_at(Instant::now() + COUNTER_TICK, COUNTER_TICK);
                for frame in frames {
                    ticker.tick().await;
                    if let Some(panel) = model.lock().metrics.as_mut() {
                        panel.set_display(id, frame);
                    }
                }
            });
        }
    }

    fn start_chart_reveal(&self) {
        let bars = match self.model.lock().chart.as_ref() {
            Some(chart) => chart.len(),
            None => return,
        };

        for index in 0..bars {
            let model = Arc::clone(&self.model);
            self.spawn_after(TrafficChart::reveal_delay(index), async move {
                model.lock().reveal_bar(index);
            });
        }
    }

    fn refresh_metrics(&self) {
        if self.model.lock().refresh_metrics().is_none() {
            return;
        }
        trace!("Metrics refreshed");

        let model = Arc::clone(&self.model);
        self.spawn_after(METRIC_HIGHLIGHT, async move {
            model.lock().clear_metric_highlight();
        });
    }

    fn realtime_tick(&self) {
        let time = clock_label(&Local::now());
        let added = {
            let mut model = self.model.lock();
            model.randomize_chart();
            model.update_activity(&self.config.activity_chance, &time)
        };

        if let Some(id) = added {
            trace!(id, "Activity entry added");
            let model = Arc::clone(&self.model);
            self.spawn_after(ACTIVITY_REVEAL_DELAY, async move {
                model.lock().reveal_activity(id);
            });
        }
    }

    fn degradation_tick(&self) {
        let degradation = self
            .model
            .lock()
            .simulate_degradation(&self.config.degradation_chance);

        if let Some(degradation) = degradation {
            info!(index = degradation.index, "Simulating service degradation");
            let model = Arc::clone(&self.model);
            self.spawn_after(DEGRADATION_DURATION, async move {
                model.lock().restore_service(&degradation);
                debug!(index = degradation.index, "Service restored");
            });
        }
    }

    fn spawn_status_check(&self) {
        let ctx = self.clone();
        self.spawn(async move {
            ctx.check_status().await;
        });
    }

    async fn check_status(&self) {
        {
            let mut model = self.model.lock();
            if model.status.is_none() {
                trace!("status panel absent, skipping check");
                return;
            }
            model.set_status(StatusDisplay::Checking);
        }

        let result = self.status_client.fetch_status().await;
        match &result {
            Ok(report) => debug!(version = %report.version, "Status check succeeded"),
            Err(e) => warn!(error = %e, "Status check failed"),
        }

        self.model
            .lock()
            .set_status(StatusDisplay::from_result(&result));
    }

    fn export_now(&self) -> Result<PathBuf, ExportError> {
        export_dashboard(&mut self.model.lock(), &self.config.export_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_from_defaults() {
        let config = SessionConfig::from_config_file(&ConfigFile::default()).unwrap();
        assert_eq!(config.timings, SessionTimings::default());
        assert_eq!(config.activity_chance.probability(), 0.3);
        assert_eq!(config.degradation_chance.probability(), 0.1);
        assert_eq!(config.services.len(), DEFAULT_SERVICES.len());
    }

    #[test]
    fn test_session_config_rejects_zero_interval() {
        let mut file = ConfigFile::default();
        file.schedule.realtime_interval_ms = 0;
        let err = SessionConfig::from_config_file(&file).unwrap_err();
        assert!(err.to_string().contains("realtime_interval_ms"));
    }

    #[test]
    fn test_session_config_rejects_bad_probability() {
        let mut file = ConfigFile::default();
        file.schedule.activity_chance = 3.0;
        assert!(matches!(
            SessionConfig::from_config_file(&file),
            Err(ConfigError::InvalidProbability(_))
        ));
    }
}
