//! Integration tests for the dashboard session.
//!
//! These tests drive a full `DashboardSession` on a paused Tokio clock:
//! - Notification lifecycle and removal
//! - Counter animations, metric refresh and chart reveal
//! - Activity feed gating and capacity
//! - Service degradation and automatic recovery
//! - Status checks against mock and real endpoints
//! - Export, system check and shutdown
//!
//! Run with: `cargo test --test session_integration`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use pulseboard::config::LayoutSettings;
use pulseboard::feed::FEED_CAPACITY;
use pulseboard::metrics::MetricId;
use pulseboard::notify::{NotificationKind, ToastPhase};
use pulseboard::random::Chance;
use pulseboard::session::{Connectivity, DashboardSession, SessionConfig};
use pulseboard::status::{
    ReqwestStatusClient, StatusClient, StatusDisplay, StatusError, StatusFuture, StatusReport,
    CONNECTION_ERROR_MESSAGE,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Status client returning a fixed result and counting calls.
struct FixedStatusClient {
    response: Result<StatusReport, StatusError>,
    calls: Arc<AtomicUsize>,
}

impl FixedStatusClient {
    fn online() -> Self {
        Self {
            response: Ok(StatusReport {
                message: "System operational".to_string(),
                version: "1.2.3".to_string(),
                status: Some("online".to_string()),
            }),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            response: Err(StatusError::Request("connection refused".to_string())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl StatusClient for FixedStatusClient {
    fn fetch_status(&self) -> StatusFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

/// Status client whose request never completes.
struct StalledStatusClient;

impl StatusClient for StalledStatusClient {
    fn fetch_status(&self) -> StatusFuture<'_> {
        Box::pin(std::future::pending())
    }
}

fn quiet_config() -> SessionConfig {
    SessionConfig {
        activity_chance: Chance::never(),
        degradation_chance: Chance::never(),
        seed: Some(7),
        ..SessionConfig::default()
    }
}

fn session_with(config: SessionConfig) -> DashboardSession {
    DashboardSession::new(config, Arc::new(FixedStatusClient::online()))
}

// ============================================================================
// Notifications
// ============================================================================

/// A toast enters, shows, leaves and is removed after 5.3 seconds.
#[tokio::test(start_paused = true)]
async fn test_notification_lifecycle() {
    let session = session_with(quiet_config());
    let id = session.notify("Cache cleared", NotificationKind::Success);

    session.with_model(|m| {
        let toast = m.notifications.get(id).unwrap();
        assert_eq!(toast.icon(), "✅");
        assert_eq!(toast.message, "Cache cleared");
        assert_eq!(toast.phase, ToastPhase::Entering);
    });

    sleep(Duration::from_millis(150)).await;
    session.with_model(|m| assert_eq!(m.notifications.get(id).unwrap().phase, ToastPhase::Shown));

    sleep(Duration::from_millis(4_900)).await;
    session.with_model(|m| {
        assert_eq!(m.notifications.get(id).unwrap().phase, ToastPhase::Leaving)
    });

    sleep(Duration::from_millis(251)).await;
    session.with_model(|m| assert!(m.notifications.is_empty()));
}

/// Each toast manages its own lifetime.
#[tokio::test(start_paused = true)]
async fn test_notifications_expire_independently() {
    let session = session_with(quiet_config());
    session.notify("first", NotificationKind::Info);
    sleep(Duration::from_secs(2)).await;
    let second = session.notify("second", NotificationKind::Warning);

    sleep(Duration::from_millis(3_400)).await;
    session.with_model(|m| {
        assert_eq!(m.notifications.len(), 1);
        assert!(m.notifications.get(second).is_some());
    });

    sleep(Duration::from_secs(2)).await;
    session.with_model(|m| assert!(m.notifications.is_empty()));
}

// ============================================================================
// Metrics and chart
// ============================================================================

/// Counters start from "0" and settle on their initial text. Kilo cards
/// count to the stripped magnitude, so they settle on "0.0k".
#[tokio::test(start_paused = true)]
async fn test_counter_animations_settle_on_initial_values() {
    let mut session = session_with(quiet_config());
    session.start();

    session.with_model(|m| {
        let panel = m.metrics.as_ref().unwrap();
        assert!(panel.cards().iter().all(|c| c.display == "0"));
    });

    sleep(Duration::from_secs(3)).await;
    session.with_model(|m| {
        let panel = m.metrics.as_ref().unwrap();
        for id in MetricId::ALL {
            let expected = match id {
                MetricId::Requests => "0.0k",
                _ => id.initial_value(),
            };
            assert_eq!(panel.get(id).unwrap().display, expected);
        }
    });

    session.stop().await;
}

/// Every five seconds the metrics refresh and flash for 300ms.
#[tokio::test(start_paused = true)]
async fn test_metric_refresh_highlight() {
    let mut session = session_with(quiet_config());
    session.start();

    sleep(Duration::from_millis(5_100)).await;
    session.with_model(|m| {
        let panel = m.metrics.as_ref().unwrap();
        assert!(panel.cards().iter().all(|c| c.refreshing));
        let perf = &panel.get(MetricId::Performance).unwrap().display;
        assert!(perf.ends_with('%'), "unexpected performance text {perf}");
    });

    sleep(Duration::from_millis(300)).await;
    session.with_model(|m| {
        assert!(m.metrics.as_ref().unwrap().cards().iter().all(|c| !c.refreshing));
    });

    session.stop().await;
}

/// Chart bars are revealed one after another.
#[tokio::test(start_paused = true)]
async fn test_chart_bars_reveal_staggered() {
    let mut session = session_with(quiet_config());
    session.start();

    sleep(Duration::from_millis(250)).await;
    session.with_model(|m| {
        let revealed = m.chart.as_ref().unwrap().bars().iter().filter(|b| b.revealed).count();
        assert_eq!(revealed, 3);
    });

    sleep(Duration::from_secs(2)).await;
    session.with_model(|m| assert!(m.chart.as_ref().unwrap().bars().iter().all(|b| b.revealed)));

    session.stop().await;
}

// ============================================================================
// Activity feed
// ============================================================================

/// Entries appear every realtime tick and the feed never exceeds six.
#[tokio::test(start_paused = true)]
async fn test_activity_feed_stays_bounded() {
    let mut session = session_with(SessionConfig {
        activity_chance: Chance::always(),
        ..quiet_config()
    });
    session.start();

    sleep(Duration::from_millis(3_050)).await;
    session.with_model(|m| {
        let feed = m.feed.as_ref().unwrap();
        assert_eq!(feed.len(), 1);
        assert!(!feed.iter().next().unwrap().revealed);
    });

    sleep(Duration::from_millis(100)).await;
    session.with_model(|m| assert!(m.feed.as_ref().unwrap().iter().next().unwrap().revealed));

    for _ in 0..20 {
        sleep(Duration::from_secs(3)).await;
        session.with_model(|m| assert!(m.feed.as_ref().unwrap().len() <= FEED_CAPACITY));
    }
    session.with_model(|m| {
        let feed = m.feed.as_ref().unwrap();
        assert_eq!(feed.len(), FEED_CAPACITY);
        let time = &feed.iter().next().unwrap().time;
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    });

    session.stop().await;
}

/// A closed gate never adds entries.
#[tokio::test(start_paused = true)]
async fn test_activity_gate_closed() {
    let mut session = session_with(quiet_config());
    session.start();
    sleep(Duration::from_secs(30)).await;
    session.with_model(|m| assert!(m.feed.as_ref().unwrap().is_empty()));
    session.stop().await;
}

// ============================================================================
// Services
// ============================================================================

/// A degraded service reverts to its exact prior state after five seconds.
#[tokio::test(start_paused = true)]
async fn test_degradation_reverts() {
    let mut session = session_with(SessionConfig {
        degradation_chance: Chance::always(),
        services: vec!["Database".to_string()],
        ..quiet_config()
    });
    session.start();

    // first degradation tick: 10s delay + 30s interval
    sleep(Duration::from_millis(39_900)).await;
    session.with_model(|m| {
        let db = m.services.as_ref().unwrap().get(0).unwrap();
        assert_eq!(db.text, "Operational");
        assert_eq!(db.class_name(), "service-status status-ok");
    });

    sleep(Duration::from_millis(200)).await;
    session.with_model(|m| {
        let db = m.services.as_ref().unwrap().get(0).unwrap();
        assert_eq!(db.text, "Degraded");
        assert!(db.class_name().contains("status-warning"));
    });

    sleep(Duration::from_secs(5)).await;
    session.with_model(|m| {
        let db = m.services.as_ref().unwrap().get(0).unwrap();
        assert_eq!(db.text, "Operational");
        assert_eq!(db.class_name(), "service-status status-ok");
    });

    session.stop().await;
}

// ============================================================================
// Status checks
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_status_online() {
    let mut session = session_with(quiet_config());
    session.start();

    session.with_model(|m| assert_eq!(m.status, Some(StatusDisplay::Idle)));

    sleep(Duration::from_millis(2_100)).await;
    session.with_model(|m| {
        let status = m.status.as_ref().unwrap();
        assert!(status.is_online());
        assert_eq!(status.text(), "System operational - v1.2.3");
    });

    session.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_status_unreachable() {
    let mut session = DashboardSession::new(quiet_config(), Arc::new(FixedStatusClient::failing()));
    session.start();

    sleep(Duration::from_millis(2_100)).await;
    session.with_model(|m| {
        assert_eq!(m.status.as_ref().unwrap().text(), "Unable to connect to the server");
    });

    session.stop().await;
}

/// A stalled request leaves the display in the checking state.
#[tokio::test(start_paused = true)]
async fn test_status_stalled_request() {
    let mut session = DashboardSession::new(quiet_config(), Arc::new(StalledStatusClient));
    session.start();

    sleep(Duration::from_secs(3)).await;
    session.with_model(|m| assert_eq!(m.status, Some(StatusDisplay::Checking)));

    session.stop().await;
}

/// Status checks repeat on their own schedule and on reconnect.
#[tokio::test(start_paused = true)]
async fn test_status_schedule_and_reconnect() {
    let client = FixedStatusClient::online();
    let calls = Arc::clone(&client.calls);
    let mut session = DashboardSession::new(quiet_config(), Arc::new(client));
    session.start();

    sleep(Duration::from_millis(1_000)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    session.connectivity_changed(Connectivity::Online);
    sleep(Duration::from_millis(10)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // 2s initial check, then 30s interval
    sleep(Duration::from_millis(30_000)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    session.connectivity_changed(Connectivity::Offline);
    session.with_model(|m| {
        assert!(m
            .notifications
            .iter()
            .any(|n| n.message == "Offline mode enabled" && n.kind == NotificationKind::Warning));
    });

    session.stop().await;
}

/// The bundled server satisfies the real HTTP client.
#[tokio::test]
async fn test_status_server_round_trip() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    let server = tokio::spawn(pulseboard::server::serve(listener, cancel.clone()));

    let client = ReqwestStatusClient::new(format!("http://{}/api/status", addr)).unwrap();
    let report = client.fetch_status().await.unwrap();
    assert_eq!(report.message, "System operational");
    assert_eq!(report.version, pulseboard::VERSION);
    assert_eq!(report.status.as_deref(), Some("online"));

    cancel.cancel();
    server.await.unwrap().unwrap();
}

/// Serve `router` on an ephemeral port and return its status URL.
async fn spawn_router(router: Router, cancel: CancellationToken) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await
    });
    format!("http://{}/api/status", addr)
}

/// A non-success response is shown as a connection error.
#[tokio::test]
async fn test_status_http_error_shows_connection_error() {
    let cancel = CancellationToken::new();
    let router = Router::new().route(
        "/api/status",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let url = spawn_router(router, cancel.clone()).await;

    let client = ReqwestStatusClient::new(url).unwrap();
    let result = client.fetch_status().await;
    assert!(matches!(
        result,
        Err(StatusError::HttpStatus { status: 500, .. })
    ));
    assert_eq!(
        StatusDisplay::from_result(&result).text(),
        CONNECTION_ERROR_MESSAGE
    );

    cancel.cancel();
}

/// A success response that is not a status report is shown as a connection error.
#[tokio::test]
async fn test_status_invalid_body_shows_connection_error() {
    let cancel = CancellationToken::new();
    let router = Router::new().route("/api/status", get(|| async { "all good" }));
    let url = spawn_router(router, cancel.clone()).await;

    let client = ReqwestStatusClient::new(url).unwrap();
    let result = client.fetch_status().await;
    assert!(matches!(result, Err(StatusError::Decode(_))));
    assert_eq!(
        StatusDisplay::from_result(&result).text(),
        CONNECTION_ERROR_MESSAGE
    );

    cancel.cancel();
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_export_action_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_with(SessionConfig {
        export_dir: dir.path().to_path_buf(),
        ..quiet_config()
    });

    session.export_data();
    session.with_model(|m| {
        assert!(m.notifications.iter().any(|n| n.message == "Preparing data export..."));
    });
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    sleep(Duration::from_millis(1_600)).await;
    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);

    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("dashboard-data-") && name.ends_with(".json"));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(value["metrics"].as_object().unwrap().len(), 4);
    assert_eq!(value["services"]["API Gateway"], "Operational");

    session.with_model(|m| {
        assert!(m.notifications.iter().any(|n| n.message == "Data exported successfully"
            && n.kind == NotificationKind::Success));
    });
}

#[tokio::test(start_paused = true)]
async fn test_system_check_sequence() {
    let session = session_with(quiet_config());
    session.system_check();

    sleep(Duration::from_millis(2_050)).await;
    session.with_model(|m| assert_eq!(m.notifications.len(), 4));

    sleep(Duration::from_millis(2_000)).await;
    session.with_model(|m| {
        assert_eq!(m.notifications.len(), 6);
        let last = m.notifications.iter().last().unwrap();
        assert_eq!(last.kind, NotificationKind::Success);
        assert!(last.message.starts_with("System check complete"));
    });
}

#[tokio::test(start_paused = true)]
async fn test_clear_cache_followup() {
    let session = session_with(quiet_config());
    session.clear_cache();

    sleep(Duration::from_millis(2_050)).await;
    session.with_model(|m| {
        let messages: Vec<_> = m.notifications.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["Cache cleared", "Performance optimized after cleanup"]);
    });
}

#[tokio::test(start_paused = true)]
async fn test_celebrate_rainbow_is_temporary() {
    let session = session_with(quiet_config());
    session.celebrate();
    session.with_model(|m| assert!(m.rainbow));

    sleep(Duration::from_millis(2_100)).await;
    session.with_model(|m| assert!(!m.rainbow));
}

// ============================================================================
// Layout and lifecycle
// ============================================================================

/// Updaters targeting disabled panels do nothing.
#[tokio::test(start_paused = true)]
async fn test_disabled_panels_are_skipped() {
    let client = FixedStatusClient::online();
    let calls = Arc::clone(&client.calls);
    let mut session = DashboardSession::new(
        SessionConfig {
            layout: LayoutSettings {
                metrics: false,
                chart: false,
                activity: false,
                services: true,
                status: false,
            },
            activity_chance: Chance::always(),
            degradation_chance: Chance::always(),
            ..quiet_config()
        },
        Arc::new(client),
    );
    session.start();

    sleep(Duration::from_secs(45)).await;
    session.with_model(|m| {
        assert!(m.metrics.is_none());
        assert!(m.chart.is_none());
        assert!(m.feed.is_none());
        assert!(m.status.is_none());
    });
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    session.stop().await;
}

/// After stop, nothing mutates the model any more.
#[tokio::test(start_paused = true)]
async fn test_stop_cancels_timers() {
    let mut session = session_with(SessionConfig {
        activity_chance: Chance::always(),
        ..quiet_config()
    });
    session.start();
    assert!(session.is_running());

    sleep(Duration::from_millis(3_500)).await;
    session.stop().await;
    assert!(!session.is_running());

    let before = session.with_model(|m| {
        (
            m.chart.as_ref().unwrap().bars().to_vec(),
            m.feed.as_ref().unwrap().len(),
        )
    });

    sleep(Duration::from_secs(30)).await;
    let after = session.with_model(|m| {
        (
            m.chart.as_ref().unwrap().bars().to_vec(),
            m.feed.as_ref().unwrap().len(),
        )
    });
    assert_eq!(before, after);
}
