//! To-do items.
//!
//! Items are persisted as one JSON array under [`TODOS_KEY`]. Deadlines are
//! normalized to UTC instants by [`parse_deadline`] before they reach a
//! [`Todo`], so overdue checks never compare strings or wall-clock times.

mod deadline;

pub use deadline::parse_deadline;

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{self, SharedStore, StorageError};
use crate::TODOS_KEY;

/// Errors from to-do operations.
#[derive(Error, Debug)]
pub enum TodoError {
    /// Text is empty after trimming.
    #[error("To-do text cannot be empty")]
    EmptyText,

    /// The deadline is in no accepted format.
    #[error("Invalid deadline '{0}' (expected RFC 3339, YYYY-MM-DD HH:MM or YYYY-MM-DD)")]
    InvalidDeadline(String),

    /// No item with this id.
    #[error("To-do not found: {0}")]
    NotFound(String),

    /// A batch operation got no ids.
    #[error("No to-do ids given")]
    EmptyBatch,

    /// Reading or writing the list failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique id.
    pub id: String,
    /// What needs doing.
    pub text: String,
    /// Done or not.
    #[serde(default)]
    pub completed: bool,
    /// When it is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    /// When it was added.
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Open with a deadline at or before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.deadline.is_some_and(|d| d <= now)
    }

    /// Open, not yet overdue, and due no later than `now + window`.
    pub fn due_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        if self.completed || self.is_overdue(now) {
            return false;
        }
        let Some(deadline) = self.deadline else {
            return false;
        };
        match chrono::Duration::from_std(window)
            .ok()
            .and_then(|w| now.checked_add_signed(w))
        {
            Some(horizon) => deadline <= horizon,
            // Window beyond the representable range: everything ahead is due.
            None => true,
        }
    }
}

/// Partial update for [`TodoList::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// New text.
    pub text: Option<String>,
    /// New completion state.
    pub completed: Option<bool>,
    /// `Some(None)` clears the deadline.
    pub deadline: Option<Option<DateTime<Utc>>>,
}

/// The persisted to-do list, newest first.
pub struct TodoList {
    storage: SharedStore,
    items: Vec<Todo>,
}

impl std::fmt::Debug for TodoList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoList")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl TodoList {
    /// Reads the list from `storage`. An empty slot is an empty list;
    /// malformed data is an error so it never gets overwritten.
    pub fn load(storage: SharedStore) -> Result<Self, TodoError> {
        let items: Vec<Todo> = storage::read_json(storage.as_ref(), TODOS_KEY)?.unwrap_or_default();
        tracing::debug!(count = items.len(), "Loaded to-dos");
        Ok(Self { storage, items })
    }

    /// All items, newest first.
    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item.
    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Adds an item at the top of the list.
    pub fn add(&mut self, text: &str, deadline: Option<DateTime<Utc>>) -> Result<&Todo, TodoError> {
        self.add_at(text, deadline, Utc::now())
    }

    /// Adds an item created at `now`.
    pub fn add_at(
        &mut self,
        text: &str,
        deadline: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<&Todo, TodoError> {
        let text = non_blank(text)?;
        let todo = Todo {
            id: self.next_id(now),
            text,
            completed: false,
            deadline,
            created_at: now,
        };
        tracing::debug!(id = %todo.id, "Adding to-do");
        self.items.insert(0, todo);
        self.persist()?;
        Ok(&self.items[0])
    }

    /// Applies `patch` to one item.
    pub fn update(&mut self, id: &str, patch: TodoPatch) -> Result<&Todo, TodoError> {
        let text = patch.text.as_deref().map(non_blank).transpose()?;
        let index = self.position(id)?;
        let todo = &mut self.items[index];
        if let Some(text) = text {
            todo.text = text;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(deadline) = patch.deadline {
            todo.deadline = deadline;
        }
        self.persist()?;
        Ok(&self.items[index])
    }

    /// Flips completion. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, TodoError> {
        let index = self.position(id)?;
        let todo = &mut self.items[index];
        todo.completed = !todo.completed;
        let completed = todo.completed;
        self.persist()?;
        Ok(completed)
    }

    /// Deletes one item.
    pub fn remove(&mut self, id: &str) -> Result<Todo, TodoError> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Marks every listed item done or not done. Unknown ids are skipped.
    /// Returns how many items matched.
    pub fn set_completed_batch<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        completed: bool,
    ) -> Result<usize, TodoError> {
        let wanted = id_set(ids)?;
        let mut count = 0;
        for todo in self.items.iter_mut().filter(|t| wanted.contains(t.id.as_str())) {
            todo.completed = completed;
            count += 1;
        }
        if count > 0 {
            self.persist()?;
        }
        Ok(count)
    }

    /// Deletes every listed item. Unknown ids are skipped. Returns how many
    /// were removed.
    pub fn remove_batch<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<usize, TodoError> {
        let wanted = id_set(ids)?;
        let before = self.items.len();
        self.items.retain(|t| !wanted.contains(t.id.as_str()));
        let count = before - self.items.len();
        if count > 0 {
            self.persist()?;
        }
        Ok(count)
    }

    /// Open items whose deadline has passed.
    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<&Todo> {
        self.items.iter().filter(|t| t.is_overdue(now)).collect()
    }

    /// Open items due within `window` that are not yet overdue.
    pub fn due_soon(&self, now: DateTime<Utc>, window: Duration) -> Vec<&Todo> {
        self.items
            .iter()
            .filter(|t| t.due_within(now, window))
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize, TodoError> {
        self.items
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))
    }

    /// Millisecond timestamp in hex, bumped until unused.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut stamp = now.timestamp_millis().max(0) as u64;
        loop {
            let id = format!("{stamp:x}");
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }

    fn persist(&self) -> Result<(), TodoError> {
        storage::write_json(self.storage.as_ref(), TODOS_KEY, &self.items)?;
        Ok(())
    }
}

fn non_blank(text: &str) -> Result<String, TodoError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(TodoError::EmptyText)
    } else {
        Ok(trimmed.to_string())
    }
}

fn id_set<S: AsRef<str>>(ids: &[S]) -> Result<HashSet<&str>, TodoError> {
    if ids.is_empty() {
        return Err(TodoError::EmptyBatch);
    }
    Ok(ids.iter().map(AsRef::as_ref).collect())
}
