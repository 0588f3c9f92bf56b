//! Counter animation for metric cards.
//!
//! A card being animated shows "0" and then counts up to its target text in
//! a fixed number of steps, one frame per [`COUNTER_TICK`]. The target is a
//! display string, so the animator recovers a numeric magnitude and a display
//! format from the text itself:
//!
//! | Text contains | Format | Frame rendering |
//! |---|---|---|
//! | `k` | [`CounterFormat::Kilo`] | value / 1000, one decimal, `k` |
//! | `%` | [`CounterFormat::Percent`] | one decimal, `%` |
//! | `,` | [`CounterFormat::Grouped`] | floor, thousands separators |
//! | otherwise | [`CounterFormat::Plain`] | floor |
//!
//! The flags are substring checks in that precedence order. The magnitude is
//! the number left after stripping everything but digits and dots, so a kilo
//! target such as `2.4k` animates to 2.4 and its frames read `0.0k`. Text
//! without any digits animates to a magnitude of zero and finishes after one
//! frame.

use std::time::Duration;

use super::format::group_thousands;

/// Number of increments used to reach the target, regardless of magnitude.
pub const COUNTER_STEPS: u32 = 50;

/// Interval between animation frames.
pub const COUNTER_TICK: Duration = Duration::from_millis(20);

/// Text shown before the first frame.
pub const COUNTER_START_TEXT: &str = "0";

/// Display format inferred from a target string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFormat {
    /// Kilo-suffixed, e.g. `2.4k`.
    Kilo,
    /// Percentage, e.g. `99.9%`.
    Percent,
    /// Integer with thousands separators, e.g. `1,247`.
    Grouped,
    /// Plain integer, e.g. `42`.
    Plain,
}

impl CounterFormat {
    /// Infer the format from the target text.
    pub fn detect(text: &str) -> Self {
        if text.contains('k') {
            CounterFormat::Kilo
        } else if text.contains('%') {
            CounterFormat::Percent
        } else if text.contains(',') {
            CounterFormat::Grouped
        } else {
            CounterFormat::Plain
        }
    }
}

/// A parsed animation target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterTarget {
    magnitude: f64,
    format: CounterFormat,
}

impl CounterTarget {
    /// Parse a display string into a target.
    pub fn parse(text: &str) -> Self {
        let format = CounterFormat::detect(text);
        let digits: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        Self {
            magnitude: leading_number(&digits),
            format,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn format(&self) -> CounterFormat {
        self.format
    }

    /// Render a running value in this target's format.
    pub fn render(&self, value: f64) -> String {
        match self.format {
            CounterFormat::Kilo => format!("{:.1}k", value / 1000.0),
            CounterFormat::Percent => format!("{:.1}%", value),
            CounterFormat::Grouped => group_thousands(value.floor() as u64),
            CounterFormat::Plain => format!("{}", value.floor() as u64),
        }
    }
}

/// Read the longest numeric prefix (`digits[.digits]`) of a cleaned string.
fn leading_number(s: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    if !seen_digit {
        return 0.0;
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Lazy sequence of animation frames, ending at the target.
///
/// Each call to `next` corresponds to one [`COUNTER_TICK`].
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: CounterTarget,
    current: f64,
    step: f64,
    finished: bool,
}

impl CounterAnimation {
    /// Animation from zero to the value described by `text`.
    pub fn new(text: &str) -> Self {
        let target = CounterTarget::parse(text);
        Self {
            target,
            current: 0.0,
            step: target.magnitude / COUNTER_STEPS as f64,
            finished: false,
        }
    }

    pub fn target(&self) -> &CounterTarget {
        &self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for CounterAnimation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        self.current += self.step;
        if self.current >= self.target.magnitude {
            self.current = self.target.magnitude;
            self.finished = true;
        }

        Some(self.target.render(self.current))
    }
}
