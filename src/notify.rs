//! Notification sink capability.
//!
//! The host application surfaces messages to the user; this crate only
//! pushes them through a narrow trait. [`TracingSink`] routes them to the
//! log, [`MemorySink`] records them for assertions.

use std::sync::RwLock;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

/// One message handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub duration_ms: u64,
}

/// Where human-readable messages go. Implemented by the host; the
/// implementations here cover logging and tests.
pub trait NotificationSink {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str, duration_ms: u64);
}

/// Sink that forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str, _duration_ms: u64) {
        match kind {
            NotificationKind::Info => info!(title, "{message}"),
            NotificationKind::Warning => warn!(title, "{message}"),
            NotificationKind::Error => error!(title, "{message}"),
        }
    }
}

/// Sink that records notifications in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: RwLock<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything notified so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.read().map(|v| v.clone()).unwrap_or_default()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str, duration_ms: u64) {
        if let Ok(mut inner) = self.inner.write() {
            inner.push(Notification {
                kind,
                title: title.to_string(),
                message: message.to_string(),
                duration_ms,
            });
        }
    }
}
