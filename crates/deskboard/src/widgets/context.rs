//! Shared state passed to widgets during rendering.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::memo::Memo;
use crate::todo::Todo;

/// Borrowed view of the data widgets display.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    /// To-do items, newest first.
    pub todos: &'a [Todo],

    /// Memo pad entries, oldest first.
    pub memos: &'a [Memo],

    /// Instant used for overdue checks.
    pub now: DateTime<Utc>,

    /// Window for the "due soon" marker.
    pub due_soon: Duration,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context at the current instant with a 24 hour window.
    pub fn new(todos: &'a [Todo], memos: &'a [Memo]) -> Self {
        Self {
            todos,
            memos,
            now: Utc::now(),
            due_soon: Duration::from_secs(24 * 3600),
        }
    }

    /// Sets the reference instant.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Sets the due-soon window.
    pub fn with_due_soon(mut self, window: Duration) -> Self {
        self.due_soon = window;
        self
    }

    /// Number of open items.
    pub fn open_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    /// Number of overdue items.
    pub fn overdue_count(&self) -> usize {
        self.todos.iter().filter(|t| t.is_overdue(self.now)).count()
    }
}
