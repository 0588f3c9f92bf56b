//! Metric cards widget.
//!
//! ```text
//! ┌ Performance ──┐┌ Active Users ─┐┌ Requests ─────┐┌ Uptime ───────┐
//! │     98.5%     ││     1,247     ││     2.4k      ││     99.9%     │
//! └───────────────┘└───────────────┘└───────────────┘└───────────────┘
//! ```
//!
//! Cards refreshed within the last few hundred milliseconds are highlighted.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use pulseboard::metrics::MetricPanel;

/// Widget displaying the four metric cards side by side.
pub struct MetricsWidget<'a> {
    panel: &'a MetricPanel,
}

impl<'a> MetricsWidget<'a> {
    pub fn new(panel: &'a MetricPanel) -> Self {
        Self { panel }
    }
}

impl Widget for MetricsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cards = self.panel.cards();
        if cards.is_empty() {
            return;
        }

        let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
        let columns = Layout::horizontal(constraints).split(area);

        for (card, column) in cards.iter().zip(columns.iter()) {
            let (border, value) = if card.refreshing {
                (
                    Style::default().fg(Color::Yellow),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(
                    format!(" {} ", card.id.label()),
                    Style::default().fg(Color::White),
                ));

            Paragraph::new(Line::from(Span::styled(card.display.as_str(), value)))
                .alignment(Alignment::Center)
                .block(block)
                .render(*column, buf);
        }
    }
}
