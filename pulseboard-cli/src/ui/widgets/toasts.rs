//! Notification toasts, stacked in the top-right corner.
//!
//! ```text
//!                         ┌────────────────────────────────┐
//!                         │ ✅ Cache cleared               │
//!                         └────────────────────────────────┘
//!                         ┌────────────────────────────────┐
//!                         │ ℹ️ Preparing data export...     │
//!                         └────────────────────────────────┘
//! ```
//!
//! Toasts that are entering or leaving are drawn dimmed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use pulseboard::notify::{NotificationCenter, NotificationKind, ToastPhase};

/// Maximum toast width in columns.
const TOAST_WIDTH: u16 = 44;

/// Height of one toast including borders.
const TOAST_HEIGHT: u16 = 3;

/// Widget overlaying active toasts on top of the dashboard.
pub struct ToastsWidget<'a> {
    center: &'a NotificationCenter,
}

impl<'a> ToastsWidget<'a> {
    pub fn new(center: &'a NotificationCenter) -> Self {
        Self { center }
    }

    fn kind_color(kind: NotificationKind) -> Color {
        match kind {
            NotificationKind::Info => Color::Cyan,
            NotificationKind::Success => Color::Green,
            NotificationKind::Warning => Color::Yellow,
            NotificationKind::Error => Color::Red,
        }
    }
}

impl Widget for ToastsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width.saturating_sub(width);

        for (i, toast) in self.center.iter().enumerate() {
            let y = area.y + i as u16 * TOAST_HEIGHT;
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let toast_area = Rect {
                x,
                y,
                width,
                height: TOAST_HEIGHT,
            };

            let color = Self::kind_color(toast.kind);
            let style = match toast.phase {
                ToastPhase::Shown => Style::default().fg(color),
                ToastPhase::Entering | ToastPhase::Leaving => {
                    Style::default().fg(color).add_modifier(Modifier::DIM)
                }
            };

            Clear.render(toast_area, buf);
            let block = Block::default().borders(Borders::ALL).border_style(style);
            let line = Line::from(vec![
                Span::raw(format!("{} ", toast.icon())),
                Span::styled(toast.message.as_str(), style),
            ]);
            Paragraph::new(line).block(block).render(toast_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::buffer_text;

    #[test]
    fn test_toasts_stack_top_right() {
        let mut center = NotificationCenter::new();
        center.push("first", NotificationKind::Info);
        center.push("second", NotificationKind::Error);

        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);
        ToastsWidget::new(&center).render(area, &mut buf);

        let text = buffer_text(&buf);
        let first = text.find("first").unwrap();
        let second = text.find("second").unwrap();
        assert!(first < second);
        // left edge of the screen stays untouched
        assert_eq!(buf.content[0].symbol(), " ");
    }

    #[test]
    fn test_overflow_is_clipped() {
        let mut center = NotificationCenter::new();
        for i in 0..5 {
            center.push(format!("toast {}", i), NotificationKind::Info);
        }
        let area = Rect::new(0, 0, 50, 7);
        let mut buf = Buffer::empty(area);
        ToastsWidget::new(&center).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("toast 1"));
        assert!(!text.contains("toast 2"));
    }
}
