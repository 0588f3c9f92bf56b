//! Terminal dashboard.
//!
//! # Module Structure
//!
//! - `render` - Layout and drawing of the whole screen
//! - `utils` - Formatting helpers and non-TUI output

mod render;
pub mod utils;

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use pulseboard::dashboard::SharedDashboard;

pub use render::render_dashboard;
pub use utils::print_simple_status;

/// Owns the terminal while the dashboard is on screen.
///
/// Raw mode and the alternate screen are restored on drop.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    model: SharedDashboard,
    frame_count: u64,
}

impl Dashboard {
    /// Take over the terminal.
    pub fn new(model: SharedDashboard) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            model,
            frame_count: 0,
        })
    }

    /// Draw one frame from the current model.
    pub fn draw(&mut self) -> io::Result<()> {
        let frame_count = self.frame_count;
        let model = &self.model;
        self.terminal.draw(|frame| {
            let model = model.lock();
            render_dashboard(frame, &model, frame_count);
        })?;
        self.frame_count = self.frame_count.wrapping_add(1);
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
}
