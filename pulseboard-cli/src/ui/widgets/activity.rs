//! Activity feed widget.
//!
//! ```text
//! ✓ 09:41  Database backup completed
//! ℹ 09:38  New user registered
//! ⚠ 09:35  High memory usage detected
//! ```
//!
//! Entries not yet revealed are dimmed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use pulseboard::feed::{ActivityFeed, ActivityKind};

/// Widget displaying the activity feed, newest first.
pub struct ActivityWidget<'a> {
    feed: &'a ActivityFeed,
}

impl<'a> ActivityWidget<'a> {
    pub fn new(feed: &'a ActivityFeed) -> Self {
        Self { feed }
    }

    fn kind_color(kind: ActivityKind) -> Color {
        match kind {
            ActivityKind::Success => Color::Green,
            ActivityKind::Info => Color::Cyan,
            ActivityKind::Warning => Color::Yellow,
        }
    }
}

impl Widget for ActivityWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.feed.is_empty() {
            let placeholder = Line::from(Span::styled(
                "Waiting for activity...",
                Style::default().fg(Color::DarkGray),
            ));
            Paragraph::new(placeholder).render(area, buf);
            return;
        }

        let lines: Vec<Line> = self
            .feed
            .iter()
            .map(|entry| {
                let (icon, time, message) = if entry.revealed {
                    (
                        Style::default().fg(Self::kind_color(entry.kind)),
                        Style::default().fg(Color::DarkGray),
                        Style::default().fg(Color::White),
                    )
                } else {
                    let dim = Style::default().fg(Color::DarkGray);
                    (dim, dim, dim)
                };

                Line::from(vec![
                    Span::styled(format!("{} ", entry.kind.icon()), icon),
                    Span::styled(format!("{}  ", entry.time), time),
                    Span::styled(entry.message.as_str(), message),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}
