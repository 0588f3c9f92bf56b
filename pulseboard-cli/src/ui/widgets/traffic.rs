//! Traffic chart widget.
//!
//! Twelve bars sized as a percentage of the chart height. Bars that have not
//! been revealed yet are drawn at zero height.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Bar, BarChart, BarGroup, Widget},
};
use pulseboard::chart::TrafficChart;

/// Widget displaying the traffic chart.
pub struct TrafficWidget<'a> {
    chart: &'a TrafficChart,
}

impl<'a> TrafficWidget<'a> {
    pub fn new(chart: &'a TrafficChart) -> Self {
        Self { chart }
    }

    /// Bar width that spreads the bars over `width` columns with 1-column gaps.
    fn bar_width(width: u16, bars: usize) -> u16 {
        if bars == 0 {
            return 1;
        }
        (width / bars as u16).saturating_sub(1).max(1)
    }

    fn bar_color(height: u8) -> Color {
        match height {
            0..=39 => Color::Blue,
            40..=79 => Color::Cyan,
            _ => Color::Green,
        }
    }
}

impl Widget for TrafficWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bars: Vec<Bar> = self
            .chart
            .bars()
            .iter()
            .map(|bar| {
                let height = if bar.revealed { bar.height_pct } else { 0 };
                Bar::default()
                    .value(height as u64)
                    .text_value(String::new())
                    .style(Style::default().fg(Self::bar_color(height)))
            })
            .collect();

        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(Self::bar_width(area.width, bars.len()))
            .bar_gap(1)
            .max(100)
            .render(area, buf);
    }
}
