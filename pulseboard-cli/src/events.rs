//! Keyboard handling for the dashboard.
//!
//! Shortcuts take Ctrl or Cmd (Super) as modifier:
//!
//! | Key          | Action          |
//! |--------------|-----------------|
//! | `R`          | refresh metrics |
//! | `E`          | export data     |
//! | `T`          | system check    |
//! | `L` (Ctrl)   | clear cache     |
//! | `q` / `Esc`  | quit            |
//!
//! Every other key press is passed through so sequences such as the Konami
//! code can be tracked.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of polling for a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// q, Esc or Ctrl+C.
    Quit,
    RefreshMetrics,
    ExportData,
    SystemCheck,
    ClearCache,
    /// Any other key press.
    Key(KeyCode),
    /// A terminal resize occurred.
    Resize(u16, u16),
    /// No actionable event within the poll window.
    None,
}

/// Poll for a single input event, waiting at most `timeout`.
pub fn poll_event(timeout: Duration) -> io::Result<InputEvent> {
    if !event::poll(timeout)? {
        return Ok(InputEvent::None);
    }

    Ok(match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key),
        Event::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    })
}

/// Map a key press to an input event.
pub fn translate_key(key: KeyEvent) -> InputEvent {
    let command = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::SUPER);

    match key.code {
        KeyCode::Char(c) if command => match c.to_ascii_lowercase() {
            'r' => InputEvent::RefreshMetrics,
            'e' => InputEvent::ExportData,
            't' => InputEvent::SystemCheck,
            'l' if key.modifiers.contains(KeyModifiers::CONTROL) => InputEvent::ClearCache,
            'c' if key.modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Quit,
            _ => InputEvent::Key(key.code),
        },
        KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,
        code => InputEvent::Key(code),
    }
}

/// ↑ ↑ ↓ ↓ ← → ← → B A
pub const KONAMI_CODE: [KeyCode; 10] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

/// Tracks the most recent key presses against the Konami code.
#[derive(Debug, Default)]
pub struct KonamiTracker {
    window: VecDeque<KeyCode>,
}

impl KonamiTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key; returns true when the last ten keys spell the code.
    pub fn push(&mut self, code: KeyCode) -> bool {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };

        if self.window.len() == KONAMI_CODE.len() {
            self.window.pop_front();
        }
        self.window.push_back(code);

        self.window.iter().eq(KONAMI_CODE.iter())
    }
}
