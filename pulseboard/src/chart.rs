//! Traffic chart bars.
//!
//! Bars start hidden and are revealed one by one at startup. Afterwards every
//! realtime tick assigns each bar an independent random height; heights jump
//! directly to the new value.

use std::ops::Range;
use std::time::Duration;

use rand::Rng;

/// Delay between revealing consecutive bars.
pub const BAR_REVEAL_STAGGER: Duration = Duration::from_millis(100);

/// Range of randomized bar heights, in percent.
pub const BAR_HEIGHT_RANGE: Range<u8> = 20..100;

/// Heights before the first randomization.
const INITIAL_HEIGHTS: [u8; 12] = [45, 62, 38, 71, 55, 83, 67, 49, 90, 58, 76, 64];

/// One bar of the traffic chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartBar {
    /// Height as a percentage of the chart area.
    pub height_pct: u8,
    pub revealed: bool,
}

/// The traffic chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficChart {
    bars: Vec<ChartBar>,
}

impl TrafficChart {
    pub fn new() -> Self {
        Self::from_heights(&INITIAL_HEIGHTS)
    }

    pub fn from_heights(heights: &[u8]) -> Self {
        let bars = heights
            .iter()
            .map(|&height_pct| ChartBar {
                height_pct,
                revealed: false,
            })
            .collect();
        Self { bars }
    }

    pub fn bars(&self) -> &[ChartBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Delay after startup at which bar `index` is revealed.
    pub fn reveal_delay(index: usize) -> Duration {
        BAR_REVEAL_STAGGER * index as u32
    }

    /// Reveal one bar.
    pub fn reveal(&mut self, index: usize) {
        if let Some(bar) = self.bars.get_mut(index) {
            bar.revealed = true;
        }
    }

    /// Give every bar a new random height.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for bar in &mut self.bars {
            bar.height_pct = rng.random_range(BAR_HEIGHT_RANGE);
        }
    }
}

impl Default for TrafficChart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::rng_from_seed;

    #[test]
    fn test_bars_start_hidden() {
        let chart = TrafficChart::new();
        assert_eq!(chart.len(), 12);
        assert!(chart.bars().iter().all(|b| !b.revealed));
    }

    #[test]
    fn test_reveal_out_of_range_is_ignored() {
        let mut chart = TrafficChart::from_heights(&[50, 50]);
        chart.reveal(1);
        chart.reveal(7);
        assert!(!chart.bars()[0].revealed);
        assert!(chart.bars()[1].revealed);
    }

    #[test]
    fn test_reveal_delay_staggers() {
        assert_eq!(TrafficChart::reveal_delay(0), Duration::ZERO);
        assert_eq!(TrafficChart::reveal_delay(3), Duration::from_millis(300));
    }

    #[test]
    fn test_randomize_stays_in_range() {
        let mut chart = TrafficChart::new();
        let mut rng = rng_from_seed(Some(9));
        for _ in 0..200 {
            chart.randomize(&mut rng);
            for bar in chart.bars() {
                assert!(BAR_HEIGHT_RANGE.contains(&bar.height_pct));
            }
        }
    }
}
