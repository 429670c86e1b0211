//! Notification service
//!
//! Transient user-visible notifications (toasts). Pages push them through the
//! [`Notifier`] trait; the terminal driver drains a [`ToastQueue`] after every
//! command.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// In-memory queue of pending toasts
#[derive(Default)]
pub struct ToastQueue {
    pending: Mutex<VecDeque<Notification>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.pending.lock().drain(..).collect()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            level = %notification.level,
            message = %notification.message,
            "Notification queued"
        );
        self.pending.lock().push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_in_order_and_empties() {
        let queue = ToastQueue::new();
        queue.notify(Notification::warning("first"));
        queue.notify(Notification::success("second"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].to_string(), "[warning] first");
        assert_eq!(drained[1].level, NotificationLevel::Success);
        assert!(queue.drain().is_empty());
    }
}
