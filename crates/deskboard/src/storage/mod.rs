//! Client-scoped key-value persistence.
//!
//! The board only ever needs three slots (layout, to-dos, memos), each holding
//! a JSON string. [`KeyValueStore`] is the seam between the domain types and
//! wherever those strings live: [`MemoryStore`] for tests and ephemeral runs,
//! [`FileStore`] for a data directory on disk.
//!
//! Callers own their schema. The store never inspects values.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a [`KeyValueStore`] or by decoding its contents.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading the slot failed.
    #[error("Failed to read storage slot '{key}' at {path}")]
    Read {
        /// Slot name.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing or removing the slot failed.
    #[error("Failed to write storage slot '{key}' at {path}")]
    Write {
        /// Slot name.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The slot holds data that does not decode as expected.
    #[error("Malformed data in storage slot '{key}'")]
    Malformed {
        /// Slot name.
        key: String,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The key cannot be mapped to a slot.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Synchronous key-value persistence.
///
/// Implementations must be usable through a shared reference so a single
/// handle can back the layout store, to-do list and memo pad at once.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Clears the slot. Removing an empty slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared storage handle.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Reads `key` and decodes it as JSON.
///
/// An empty slot yields `Ok(None)`; undecodable content yields
/// [`StorageError::Malformed`].
pub fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError>
where
    T: serde::de::DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn write_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: serde::Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Malformed {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
