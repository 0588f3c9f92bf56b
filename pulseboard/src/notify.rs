//! Transient notification toasts.
//!
//! The center only holds toasts and their phase. The session drives each
//! toast through its lifecycle on timers:
//!
//! ```text
//! push ──100ms──► Shown ──5s from push──► Leaving ──300ms──► removed
//! ```
//!
//! There is no cap on concurrent toasts; they stack in creation order.

use std::fmt;
use std::time::Duration;

/// Delay before a new toast becomes fully visible.
pub const NOTIFICATION_ENTER_DELAY: Duration = Duration::from_millis(100);

/// Time from creation until the toast starts leaving.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);

/// Duration of the leave transition before removal.
pub const NOTIFICATION_FADE: Duration = Duration::from_millis(300);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ️",
            NotificationKind::Success => "✅",
            NotificationKind::Warning => "⚠️",
            NotificationKind::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }

    /// Parse a kind name; unknown names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "success" => NotificationKind::Success,
            "warning" => NotificationKind::Warning,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Info,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

pub type NotificationId = u64;

/// A toast on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub phase: ToastPhase,
}

impl Notification {
    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }
}

/// Stack of active toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    toasts: Vec<Notification>,
    next_id: NotificationId,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast in the `Entering` phase.
    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Notification {
            id,
            message: message.into(),
            kind,
            phase: ToastPhase::Entering,
        });
        id
    }

    /// Finish the enter transition.
    pub fn show(&mut self, id: NotificationId) {
        self.set_phase(id, ToastPhase::Shown);
    }

    /// Start the leave transition.
    pub fn begin_dismiss(&mut self, id: NotificationId) {
        self.set_phase(id, ToastPhase::Leaving);
    }

    /// Remove a toast. Returns false if it was already gone.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    fn set_phase(&mut self, id: NotificationId, phase: ToastPhase) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            toast.phase = phase;
        }
    }
}
