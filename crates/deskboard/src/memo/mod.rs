//! Memo pad entries, persisted under [`MEMOS_KEY`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{self, SharedStore, StorageError};
use crate::MEMOS_KEY;

/// Errors from memo operations.
#[derive(Error, Debug)]
pub enum MemoError {
    /// Content is empty after trimming.
    #[error("Memo content cannot be empty")]
    EmptyContent,

    /// No memo with this id.
    #[error("Memo not found: {0}")]
    NotFound(String),

    /// Reading or writing the pad failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A single memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Unique id.
    pub id: String,
    /// Memo text. May span several lines.
    pub content: String,
    /// When it was written.
    pub created_at: DateTime<Utc>,
    /// Last edit.
    pub updated_at: DateTime<Utc>,
}

/// The memo pad, oldest first.
pub struct MemoPad {
    storage: SharedStore,
    memos: Vec<Memo>,
}

impl std::fmt::Debug for MemoPad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoPad")
            .field("memos", &self.memos)
            .finish_non_exhaustive()
    }
}

impl MemoPad {
    /// Reads the pad from `storage`.
    pub fn load(storage: SharedStore) -> Result<Self, MemoError> {
        let memos = storage::read_json(storage.as_ref(), MEMOS_KEY)?.unwrap_or_default();
        Ok(Self { storage, memos })
    }

    /// All memos, oldest first.
    pub fn list(&self) -> &[Memo] {
        &self.memos
    }

    /// Looks up a memo.
    pub fn get(&self, id: &str) -> Option<&Memo> {
        self.memos.iter().find(|m| m.id == id)
    }

    /// Appends a memo.
    pub fn add(&mut self, content: &str) -> Result<&Memo, MemoError> {
        let content = non_blank(content)?;
        let now = Utc::now();
        let mut stamp = now.timestamp_millis().max(0) as u64;
        while self.get(&format!("{stamp:x}")).is_some() {
            stamp += 1;
        }
        self.memos.push(Memo {
            id: format!("{stamp:x}"),
            content,
            created_at: now,
            updated_at: now,
        });
        self.persist()?;
        let index = self.memos.len() - 1;
        Ok(&self.memos[index])
    }

    /// Replaces a memo's content.
    pub fn edit(&mut self, id: &str, content: &str) -> Result<&Memo, MemoError> {
        let content = non_blank(content)?;
        let index = self.position(id)?;
        let memo = &mut self.memos[index];
        memo.content = content;
        memo.updated_at = Utc::now();
        self.persist()?;
        Ok(&self.memos[index])
    }

    /// Deletes a memo.
    pub fn remove(&mut self, id: &str) -> Result<Memo, MemoError> {
        let index = self.position(id)?;
        let removed = self.memos.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Deletes every memo and the stored slot. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize, MemoError> {
        let count = self.memos.len();
        self.memos.clear();
        self.storage.remove(MEMOS_KEY)?;
        Ok(count)
    }

    fn position(&self, id: &str) -> Result<usize, MemoError> {
        self.memos
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| MemoError::NotFound(id.to_string()))
    }

    fn persist(&self) -> Result<(), MemoError> {
        storage::write_json(self.storage.as_ref(), MEMOS_KEY, &self.memos)?;
        Ok(())
    }
}

fn non_blank(content: &str) -> Result<String, MemoError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        Err(MemoError::EmptyContent)
    } else {
        Ok(trimmed.to_string())
    }
}
