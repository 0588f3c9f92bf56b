//! Server status widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use pulseboard::status::StatusDisplay;

/// Widget displaying the last status check result.
pub struct StatusWidget<'a> {
    display: &'a StatusDisplay,
}

impl<'a> StatusWidget<'a> {
    pub fn new(display: &'a StatusDisplay) -> Self {
        Self { display }
    }

    fn indicator(&self) -> (&'static str, Color) {
        match self.display {
            StatusDisplay::Idle => ("○", Color::DarkGray),
            StatusDisplay::Checking => ("◌", Color::Yellow),
            StatusDisplay::Online { .. } => ("●", Color::Green),
            StatusDisplay::Unreachable => ("●", Color::Red),
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (dot, color) = self.indicator();
        let line = Line::from(vec![
            Span::styled(format!("{} ", dot), Style::default().fg(color)),
            Span::styled(self.display.text(), Style::default().fg(color)),
        ]);

        Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::buffer_text;

    #[test]
    fn test_online_text() {
        let display = StatusDisplay::Online {
            message: "System operational".into(),
            version: "0.3.0".into(),
        };
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StatusWidget::new(&display).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("System operational - v0.3.0"));
    }

    #[test]
    fn test_unreachable_text() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StatusWidget::new(&StatusDisplay::Unreachable).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Unable to connect to the server"));
    }
}
