//! Service health widget.
//!
//! One row per service: name on the left, colored badge on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use pulseboard::services::{ServiceBoard, ServiceLevel};

/// Width reserved for the service name column.
const NAME_WIDTH: usize = 16;

/// Widget displaying service health badges.
pub struct ServicesWidget<'a> {
    board: &'a ServiceBoard,
}

impl<'a> ServicesWidget<'a> {
    pub fn new(board: &'a ServiceBoard) -> Self {
        Self { board }
    }

    fn level_style(level: ServiceLevel) -> Style {
        let color = match level {
            ServiceLevel::Ok => Color::Green,
            ServiceLevel::Warning => Color::Yellow,
            ServiceLevel::Error => Color::Red,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

impl Widget for ServicesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .board
            .services()
            .iter()
            .map(|service| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", service.name, width = NAME_WIDTH),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled("● ", Self::level_style(service.level)),
                    Span::styled(service.text.as_str(), Self::level_style(service.level)),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}
