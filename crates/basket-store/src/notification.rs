//! # User Notifications
//!
//! Short success/error messages the store queues for the presentation
//! layer ("Added "Milk" to list"). The host drains the queue after each
//! operation and shows them as toasts.
//!
//! ## Queue Behaviour
//! ```text
//! store mutation ──push──► [ oldest ... newest ] ──drain──► host UI
//!                              │
//!                              └── capped at MAX_PENDING; overflow drops oldest
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use ts_rs::TS;

/// Maximum queued notifications before the oldest are dropped.
pub const MAX_PENDING: usize = 100;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// One user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    #[ts(as = "String")]
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Bounded FIFO of pending notifications.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    pending: VecDeque<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message.into());
    }

    fn push(&mut self, level: NotificationLevel, message: String) {
        if self.pending.len() == MAX_PENDING {
            self.pending.pop_front();
        }
        self.pending.push_back(Notification {
            level,
            message,
            at: Utc::now(),
        });
    }

    /// Removes and returns everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }
}
