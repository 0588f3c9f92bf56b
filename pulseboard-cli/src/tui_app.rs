//! TUI Application module for Pulseboard CLI.
//!
//! This module contains the interactive loop, separated from argument
//! parsing and session setup.
//!
//! # Architecture
//!
//! - `run_tui()` - Interactive dashboard with keyboard shortcuts
//! - `run_headless()` - Periodic status lines for non-TTY environments
//!
//! The `run` command acts as a thin front controller that:
//! 1. Loads and validates configuration
//! 2. Creates and starts the `DashboardSession`
//! 3. Delegates to `run_tui()` or `run_headless()`
//!
//! Both loops run on the main thread while the session's timers run on the
//! Tokio runtime; the runtime must be entered by the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pulseboard::session::DashboardSession;
use tracing::{debug, info};

use crate::error::CliError;
use crate::events::{poll_event, InputEvent, KonamiTracker};
use crate::ui::{self, Dashboard};

/// How long to wait for input before redrawing.
const TICK_RATE: Duration = Duration::from_millis(50);

/// Interval between headless status lines.
const HEADLESS_INTERVAL: Duration = Duration::from_secs(30);

/// Run the interactive dashboard until the user quits.
pub fn run_tui(session: &DashboardSession) -> Result<(), CliError> {
    let mut dashboard = Dashboard::new(session.model()).map_err(CliError::Terminal)?;
    let mut konami = KonamiTracker::new();
    info!("Dashboard UI started");

    loop {
        dashboard.draw().map_err(CliError::Terminal)?;

        match poll_event(TICK_RATE).map_err(CliError::Terminal)? {
            InputEvent::Quit => break,
            InputEvent::RefreshMetrics => session.refresh_metrics(),
            InputEvent::ExportData => session.export_data(),
            InputEvent::SystemCheck => session.system_check(),
            InputEvent::ClearCache => session.clear_cache(),
            InputEvent::Key(code) => {
                if konami.push(code) {
                    session.celebrate();
                }
            }
            InputEvent::Resize(width, height) => debug!(width, height, "Terminal resized"),
            InputEvent::None => {}
        }
    }

    info!("Dashboard UI closed");
    Ok(())
}

/// Run in headless mode (non-TTY environments).
///
/// Prints a status line every 30 seconds until Ctrl+C.
pub fn run_headless(session: &DashboardSession) -> Result<(), CliError> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = Arc::clone(&shutdown);

    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    println!("Pulseboard v{} running headless.", pulseboard::VERSION);
    println!("Press Ctrl+C to stop.");
    println!();

    let model = session.model();
    let started = Instant::now();
    let mut last_line = Instant::now();

    while !shutdown.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));

        if last_line.elapsed() >= HEADLESS_INTERVAL {
            ui::dashboard::print_simple_status(&model.lock(), started.elapsed());
            last_line = Instant::now();
        }
    }

    println!();
    println!("Session Summary");
    println!("───────────────");
    ui::dashboard::print_simple_status(&model.lock(), started.elapsed());
    Ok(())
}
