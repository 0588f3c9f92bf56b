//! Full-screen dashboard layout.
//!
//! ```text
//! ┌ Pulseboard v0.3.0 ─────────────────────────────────────────────┐
//! │ [ metric ] [ metric ] [ metric ] [ metric ]                    │
//! │ ┌ Traffic ─────────────────┐ ┌ Services ─────────────────────┐ │
//! │ └──────────────────────────┘ └───────────────────────────────┘ │
//! │ ┌ Activity ────────────────┐ ┌ Server Status ────────────────┐ │
//! │ └──────────────────────────┘ └───────────────────────────────┘ │
//! │ ^R refresh  ^E export  ^T system check  ^L clear cache  q quit │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Disabled panels are left out and the remaining ones take their space.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use pulseboard::dashboard::DashboardModel;

use crate::ui::widgets::{
    ActivityWidget, MetricsWidget, ServicesWidget, StatusWidget, ToastsWidget, TrafficWidget,
};

/// Colors cycled through by the rainbow title.
const RAINBOW: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Render the dashboard. `frame_count` drives the rainbow animation.
pub fn render_dashboard(frame: &mut Frame, model: &DashboardModel, frame_count: u64) {
    let size = frame.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title_line(model.rainbow, frame_count));
    let inner = outer.inner(size);
    frame.render_widget(outer, size);

    let has_lower = model.feed.is_some() || model.status.is_some();
    let has_middle = model.chart.is_some() || model.services.is_some();

    let mut constraints = Vec::new();
    if model.metrics.is_some() {
        constraints.push(Constraint::Length(3));
    }
    if has_middle {
        constraints.push(Constraint::Min(8));
    }
    if has_lower {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(1));

    let rows = Layout::vertical(constraints).split(inner);
    let mut row = rows.iter().copied();

    if let Some(panel) = model.metrics.as_ref() {
        if let Some(area) = row.next() {
            frame.render_widget(MetricsWidget::new(panel), area);
        }
    }

    if has_middle {
        if let Some(area) = row.next() {
            let [left, right] = split_columns(area);
            if let Some(chart) = model.chart.as_ref() {
                let inner = section(frame, left, "Traffic");
                frame.render_widget(TrafficWidget::new(chart), inner);
            }
            if let Some(board) = model.services.as_ref() {
                let inner = section(frame, right, "Services");
                frame.render_widget(ServicesWidget::new(board), inner);
            }
        }
    }

    if has_lower {
        if let Some(area) = row.next() {
            let [left, right] = split_columns(area);
            if let Some(feed) = model.feed.as_ref() {
                let inner = section(frame, left, "Activity");
                frame.render_widget(ActivityWidget::new(feed), inner);
            }
            if let Some(status) = model.status.as_ref() {
                let inner = section(frame, right, "Server Status");
                frame.render_widget(StatusWidget::new(status), inner);
            }
        }
    }

    if let Some(area) = row.next() {
        frame.render_widget(Paragraph::new(help_line()), area);
    }

    frame.render_widget(ToastsWidget::new(&model.notifications), inner);
}

/// Draw a titled section border and return the area inside it.
fn section(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn split_columns(area: Rect) -> [Rect; 2] {
    let columns = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    [columns[0], columns[1]]
}

fn title_line(rainbow: bool, frame_count: u64) -> Line<'static> {
    let title = format!(" Pulseboard v{} ", pulseboard::VERSION);
    if !rainbow {
        return Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let spans: Vec<Span> = title
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let color = RAINBOW[(i + frame_count as usize) % RAINBOW.len()];
            Span::styled(
                c.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Line::from(spans)
}

fn help_line() -> Line<'static> {
    let key = Style::default().fg(Color::Cyan);
    let label = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::styled(" ^R", key),
        Span::styled(" refresh  ", label),
        Span::styled("^E", key),
        Span::styled(" export  ", label),
        Span::styled("^T", key),
        Span::styled(" system check  ", label),
        Span::styled("^L", key),
        Span::styled(" clear cache  ", label),
        Span::styled("q", key),
        Span::styled(" quit", label),
    ])
}
