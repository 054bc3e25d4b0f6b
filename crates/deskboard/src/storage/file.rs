//! File-backed key-value store.
//!
//! Each slot is a `<key>.json` file inside the data directory. Writes go to a
//! sibling temporary file first and are renamed into place, so a crash never
//! leaves a half-written slot behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};
use crate::config::xdg;

/// Store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        xdg::ensure_dir(&root).map_err(|source| StorageError::Write {
            key: String::new(),
            path: root.clone(),
            source,
        })?;
        tracing::debug!("opened file store at {}", root.display());
        Ok(Self { root })
    }

    /// Directory holding the slot files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    ///
    /// Keys are restricted to ASCII alphanumerics, `-` and `_` so they can
    /// never escape the data directory.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            path: path.clone(),
            source,
        };
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = FileStore::open(dir.path().join("data")).expect("open should succeed");
        (dir, store)
    }

    #[test]
    fn open_creates_directory() {
        let (dir, store) = temp_store();
        assert!(dir.path().join("data").is_dir());
        assert_eq!(store.root(), dir.path().join("data"));
    }

    #[test]
    fn get_missing_slot_is_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("widgetsLayout").expect("get"), None);
    }

    #[test]
    fn set_then_get_persists_to_file() {
        let (_dir, store) = temp_store();
        store.set("todos", "[]").expect("set");
        assert_eq!(store.get("todos").expect("get"), Some("[]".to_string()));
        let path = store.slot_path("todos").expect("valid key");
        assert_eq!(fs::read_to_string(path).expect("file exists"), "[]");
    }

    #[test]
    fn set_leaves_no_temporary_file() {
        let (_dir, store) = temp_store();
        store.set("memos", "[]").expect("set");
        let leftovers: Vec<_> = fs::read_dir(store.root())
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn reopen_sees_previous_writes() {
        let (dir, store) = temp_store();
        store.set("memos", "[1]").expect("set");
        let reopened = FileStore::open(dir.path().join("data")).expect("reopen");
        assert_eq!(reopened.get("memos").expect("get"), Some("[1]".to_string()));
    }

    #[test]
    fn remove_missing_slot_is_ok() {
        let (_dir, store) = temp_store();
        store.remove("widgetsLayout").expect("remove missing");
        store.set("widgetsLayout", "[]").expect("set");
        store.remove("widgetsLayout").expect("remove");
        assert_eq!(store.get("widgetsLayout").expect("get"), None);
    }

    #[test]
    fn path_traversal_keys_are_rejected() {
        let (_dir, store) = temp_store();
        for key in ["../escape", "a/b", "", "dot.key"] {
            match store.set(key, "x") {
                Err(StorageError::InvalidKey(k)) => assert_eq!(k, key),
                other => panic!("expected InvalidKey for {key:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn unreadable_slot_reports_read_error() {
        let (_dir, store) = temp_store();
        // A directory where the slot file should be cannot be read as a string.
        let path = store.slot_path("todos").expect("valid key");
        fs::create_dir_all(&path).expect("create dir");
        match store.get("todos") {
            Err(StorageError::Read { key, .. }) => assert_eq!(key, "todos"),
            other => panic!("expected Read error, got: {other:?}"),
        }
    }
}
