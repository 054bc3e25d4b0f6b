//! User-facing warning sinks.
//!
//! Rejected drags are not errors from the caller's point of view; they are
//! surfaced as short transient messages. The [`Notifier`] seam decouples the
//! drag state machine from where those messages end up.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Fire-and-forget warning sink.
pub trait Notifier: Send + Sync {
    /// Surfaces a transient warning.
    fn warn(&self, message: &str);
}

/// Shared notifier handle.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Sends warnings to the `tracing` pipeline. Used by one-shot CLI commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// A single status-line message that expires after a fixed duration.
///
/// Cloning shares the slot, so the drag controller can write to one clone
/// while the renderer reads another.
#[derive(Debug, Clone)]
pub struct StatusLine {
    slot: Arc<Mutex<Option<(String, Instant)>>>,
    ttl: Duration,
}

impl StatusLine {
    /// Creates an empty status line whose messages live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    /// Replaces the current message.
    pub fn set(&self, message: impl Into<String>) {
        *self.lock() = Some((message.into(), Instant::now()));
    }

    /// Current message, if one is set and not yet expired.
    pub fn current(&self) -> Option<String> {
        self.current_at(Instant::now())
    }

    /// Current message as seen at `now`.
    pub fn current_at(&self, now: Instant) -> Option<String> {
        self.lock()
            .as_ref()
            .filter(|(_, since)| now.saturating_duration_since(*since) < self.ttl)
            .map(|(msg, _)| msg.clone())
    }

    /// Drops the message once its time is up.
    pub fn expire(&self) {
        self.expire_at(Instant::now());
    }

    /// Drops the message if it has expired at `now`.
    pub fn expire_at(&self, now: Instant) {
        let mut slot = self.lock();
        if let Some((_, since)) = slot.as_ref() {
            if now.saturating_duration_since(*since) >= self.ttl {
                *slot = None;
            }
        }
    }

    /// Clears the message immediately.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<(String, Instant)>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for StatusLine {
    fn warn(&self, message: &str) {
        tracing::debug!("status: {message}");
        self.set(message);
    }
}

/// Records every warning. Test helper shared across modules.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
