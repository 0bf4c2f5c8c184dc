//! Transient toast notifications.
//!
//! Time is passed in by the caller so expiry is deterministic under test.

use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const DISPLAY_FOR: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    shown_at: Instant,
}

/// Holds at most one notification; a new one supersedes the old.
#[derive(Debug, Default)]
pub struct Toast {
    current: Option<Notification>,
}

impl Toast {
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            kind,
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message, NotificationKind::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message, NotificationKind::Error, now);
    }

    /// Drop the notification once it has been visible for `DISPLAY_FOR`.
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= DISPLAY_FOR);
        if expired {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
