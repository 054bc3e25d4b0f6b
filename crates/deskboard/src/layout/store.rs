//! The canonical placement sequence and its persistence.
//!
//! [`LayoutStore`] is an ordinary value: it owns the sequence, the catalog it
//! was validated against and a handle to the storage it writes through to.
//! Every accepted move is persisted before the call returns. Storage failures
//! never reach the board; reads fall back to the defaults and failed writes
//! are logged.

use std::collections::HashMap;

use serde::Deserialize;

use crate::layout::catalog::WidgetCatalog;
use crate::layout::placement::{self, MoveRejection};
use crate::storage::{self, SharedStore};
use crate::{Column, WidgetPlacement, WidgetWidth, LAYOUT_KEY};

/// A persisted placement as read back. Either attribute may be missing in
/// data written by older builds.
#[derive(Debug, Deserialize)]
struct StoredPlacement {
    id: String,
    #[serde(default)]
    column: Option<Column>,
    #[serde(default)]
    width: Option<WidgetWidth>,
}

/// Owns the placement sequence.
pub struct LayoutStore {
    storage: SharedStore,
    catalog: WidgetCatalog,
    placements: Vec<WidgetPlacement>,
}

impl std::fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStore")
            .field("catalog", &self.catalog)
            .field("placements", &self.placements)
            .finish_non_exhaustive()
    }
}

impl LayoutStore {
    /// Creates a store holding the default sequence. Nothing is read yet.
    pub fn new(storage: SharedStore, catalog: WidgetCatalog) -> Self {
        let placements = catalog.default_placements();
        Self {
            storage,
            catalog,
            placements,
        }
    }

    /// Creates a store and loads the persisted layout.
    pub fn open(storage: SharedStore, catalog: WidgetCatalog) -> Self {
        let mut store = Self::new(storage, catalog);
        store.load();
        store
    }

    /// Replaces the in-memory sequence with the persisted one, merged
    /// against the catalog.
    pub fn load(&mut self) -> &[WidgetPlacement] {
        self.placements = match storage::read_json::<Vec<StoredPlacement>>(
            self.storage.as_ref(),
            LAYOUT_KEY,
        ) {
            Ok(Some(stored)) => merge(&self.catalog, stored),
            Ok(None) => {
                tracing::debug!("No persisted layout, using defaults");
                self.catalog.default_placements()
            }
            Err(e) => {
                tracing::warn!("Ignoring persisted layout: {e}");
                self.catalog.default_placements()
            }
        };
        &self.placements
    }

    /// Applies a move and writes the result through to storage.
    ///
    /// See [`placement::attempt_move`] for the index conventions.
    pub fn apply_move(
        &mut self,
        drag_index: usize,
        hover_index: usize,
        source_column: Column,
        target_column: Column,
    ) -> Result<&[WidgetPlacement], MoveRejection> {
        let next = placement::attempt_move(
            &self.placements,
            drag_index,
            hover_index,
            source_column,
            target_column,
        )?;
        if next != self.placements {
            tracing::debug!(
                drag_index,
                hover_index,
                %target_column,
                "Layout changed"
            );
            self.placements = next;
            self.persist();
        }
        Ok(&self.placements)
    }

    /// Forgets the persisted layout and reverts to the defaults.
    pub fn reset(&mut self) -> &[WidgetPlacement] {
        if let Err(e) = self.storage.remove(LAYOUT_KEY) {
            tracing::warn!("Failed to clear persisted layout: {e}");
        }
        self.placements = self.catalog.default_placements();
        &self.placements
    }

    /// Current sequence.
    pub fn placements(&self) -> &[WidgetPlacement] {
        &self.placements
    }

    /// Flat index of `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.placements.iter().position(|p| p.id == id)
    }

    /// Placement of `id`.
    pub fn get(&self, id: &str) -> Option<&WidgetPlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Catalog the sequence is validated against.
    pub fn catalog(&self) -> &WidgetCatalog {
        &self.catalog
    }

    fn persist(&self) {
        if let Err(e) = storage::write_json(self.storage.as_ref(), LAYOUT_KEY, &self.placements) {
            tracing::warn!("Failed to persist layout: {e}");
        }
    }
}

/// Catalog order, each id taking its persisted column and width when the
/// persisted data mentions it. The first persisted entry for an id wins and
/// ids the catalog no longer has are dropped.
fn merge(catalog: &WidgetCatalog, stored: Vec<StoredPlacement>) -> Vec<WidgetPlacement> {
    let mut overrides: HashMap<String, StoredPlacement> = HashMap::with_capacity(stored.len());
    for entry in stored {
        if !catalog.contains(&entry.id) {
            tracing::debug!(id = %entry.id, "Dropping unknown widget from persisted layout");
            continue;
        }
        overrides.entry(entry.id.clone()).or_insert(entry);
    }

    catalog
        .entries()
        .iter()
        .map(|default| match overrides.get(&default.id) {
            Some(entry) => WidgetPlacement {
                id: default.id.clone(),
                column: entry.column.unwrap_or(default.column),
                width: entry.width.unwrap_or(default.width),
            },
            None => default.placement(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::catalog::CatalogEntry;
    use crate::storage::{KeyValueStore, MemoryStore, StorageError};
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Reads succeed with whatever was seeded, writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                path: PathBuf::from("/read-only"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.set(key, "")
        }
    }

    /// A:left, B:center, C:right
    fn abc() -> WidgetCatalog {
        WidgetCatalog::new(vec![
            CatalogEntry::new("A", Column::Left),
            CatalogEntry::new("B", Column::Center),
            CatalogEntry::new("C", Column::Right),
        ])
        .expect("valid catalog")
    }

    fn store_with(raw: Option<&str>, catalog: WidgetCatalog) -> (Arc<MemoryStore>, LayoutStore) {
        let mem = Arc::new(match raw {
            Some(raw) => MemoryStore::with_entries([(LAYOUT_KEY, raw)]),
            None => MemoryStore::new(),
        });
        let store = LayoutStore::open(mem.clone(), catalog);
        (mem, store)
    }

    fn layout(store: &LayoutStore) -> Vec<(&str, Column)> {
        store
            .placements()
            .iter()
            .map(|p| (p.id.as_str(), p.column))
            .collect()
    }

    #[test]
    fn load_without_persisted_data_is_default() {
        let (_, store) = store_with(None, WidgetCatalog::builtin());
        assert_eq!(
            store.placements(),
            WidgetCatalog::builtin().default_placements().as_slice()
        );
    }

    #[test]
    fn load_merges_partial_persisted_layout() {
        let (_, store) = store_with(Some(r#"[{"id":"B","column":"right"}]"#), abc());
        assert_eq!(
            layout(&store),
            vec![
                ("A", Column::Left),
                ("B", Column::Right),
                ("C", Column::Right)
            ]
        );
    }

    #[test]
    fn load_keeps_catalog_order() {
        let catalog = WidgetCatalog::new(vec![
            CatalogEntry::new("A", Column::Left),
            CatalogEntry::new("B", Column::Center),
            CatalogEntry::new("C", Column::Right),
            CatalogEntry::new("E", Column::Center),
        ])
        .expect("valid catalog");
        let raw = r#"[{"id":"C","column":"right"},{"id":"B","column":"right"}]"#;
        let (_, store) = store_with(Some(raw), catalog);
        assert_eq!(
            layout(&store),
            vec![
                ("A", Column::Left),
                ("B", Column::Right),
                ("C", Column::Right),
                ("E", Column::Center)
            ]
        );
        let right: Vec<&str> = placement::column_members(store.placements(), Column::Right)
            .map(|(_, p)| p.id.as_str())
            .collect();
        assert_eq!(right, vec!["B", "C"]);
    }

    #[test]
    fn load_drops_removed_widgets_and_adds_new_ones() {
        let raw = r#"[
            {"id":"C","column":"right","width":"wide"},
            {"id":"gone","column":"left"},
            {"id":"A","column":"left"},
            {"id":"B","column":"center"}
        ]"#;
        let catalog = WidgetCatalog::new(vec![
            CatalogEntry::new("A", Column::Left),
            CatalogEntry::new("B", Column::Center),
            CatalogEntry::new("C", Column::Right),
            CatalogEntry::new("D", Column::Center).with_width(WidgetWidth::Wide),
        ])
        .expect("valid catalog");
        let (_, store) = store_with(Some(raw), catalog);
        assert_eq!(
            layout(&store),
            vec![
                ("A", Column::Left),
                ("B", Column::Center),
                ("C", Column::Right),
                ("D", Column::Center)
            ]
        );
        assert_eq!(store.get("C").map(|p| p.width), Some(WidgetWidth::Wide));
        assert_eq!(store.get("D").map(|p| p.width), Some(WidgetWidth::Wide));
        assert!(store.get("gone").is_none());
    }

    #[test]
    fn load_first_occurrence_wins() {
        let raw = r#"[{"id":"A","column":"left"},{"id":"A","column":"right"}]"#;
        let (_, store) = store_with(Some(raw), abc());
        assert_eq!(store.get("A").map(|p| p.column), Some(Column::Left));
        assert_eq!(store.placements().len(), 3);
    }

    #[test]
    fn load_missing_column_falls_back_to_default() {
        let (_, store) = store_with(Some(r#"[{"id":"C"}]"#), abc());
        assert_eq!(store.get("C").map(|p| p.column), Some(Column::Right));
    }

    #[test]
    fn load_malformed_is_default() {
        let (_, store) = store_with(Some("{not json"), abc());
        assert_eq!(store.placements(), abc().default_placements().as_slice());
    }

    #[test]
    fn load_honours_persisted_column_even_if_one_empties() {
        let raw = r#"[{"id":"A","column":"center"}]"#;
        let (_, store) = store_with(Some(raw), abc());
        assert_eq!(
            layout(&store),
            vec![
                ("A", Column::Center),
                ("B", Column::Center),
                ("C", Column::Right)
            ]
        );
        assert_eq!(placement::column_count(store.placements(), Column::Left), 0);
    }

    #[test]
    fn apply_move_persists() {
        let (mem, mut store) = store_with(None, abc());
        // Give the centre a second member so B can leave.
        store
            .apply_move(0, 3, Column::Left, Column::Center)
            .expect_err("A is alone on the left");
        store
            .apply_move(2, 1, Column::Right, Column::Center)
            .expect_err("C is alone on the right");
        assert!(!mem.contains(LAYOUT_KEY));

        let (mem, mut store) = store_with(
            Some(r#"[{"id":"A"},{"id":"B"},{"id":"C"},{"id":"A2"}]"#),
            WidgetCatalog::new(vec![
                CatalogEntry::new("A", Column::Left),
                CatalogEntry::new("A2", Column::Left),
                CatalogEntry::new("B", Column::Center),
                CatalogEntry::new("C", Column::Right),
            ])
            .expect("valid catalog"),
        );
        store
            .apply_move(0, 3, Column::Left, Column::Right)
            .expect("A may leave, A2 stays");
        let raw = mem.get(LAYOUT_KEY).expect("get").expect("persisted");
        let persisted: Vec<WidgetPlacement> = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(persisted, store.placements());
        assert_eq!(persisted.last().map(|p| p.id.as_str()), Some("A"));
        assert_eq!(persisted.last().map(|p| p.column), Some(Column::Right));
    }

    #[test]
    fn apply_move_then_reload_round_trips() {
        let (mem, mut store) = store_with(None, WidgetCatalog::builtin());
        let drag = store.index_of("clock").expect("clock exists");
        let len = store.placements().len();
        store
            .apply_move(drag, len, Column::Left, Column::Right)
            .expect("move clock");
        let reloaded = LayoutStore::open(mem, WidgetCatalog::builtin());
        // Columns survive a reload; order within a column follows the catalog.
        assert_eq!(reloaded.get("clock").map(|p| p.column), Some(Column::Right));
        assert_eq!(reloaded.placements()[0].id, "clock");
        for p in store.placements() {
            assert_eq!(reloaded.get(&p.id), Some(p));
        }
    }

    #[test]
    fn rejected_move_leaves_sequence() {
        let (_, mut store) = store_with(None, WidgetCatalog::builtin());
        let before = store.placements().to_vec();
        let memo = store.index_of("memo").expect("memo exists");
        let err = store
            .apply_move(memo, 0, Column::Right, Column::Left)
            .expect_err("memo is alone on the right");
        assert_eq!(
            err,
            MoveRejection::LastWidgetInColumn {
                column: Column::Right
            }
        );
        assert_eq!(store.placements(), before.as_slice());
    }

    #[test]
    fn failed_write_still_advances_in_memory() {
        let ro = Arc::new(ReadOnlyStore(MemoryStore::new()));
        let mut store = LayoutStore::open(ro, WidgetCatalog::builtin());
        let drag = store.index_of("timer").expect("timer exists");
        store
            .apply_move(drag, 0, Column::Left, Column::Center)
            .expect("move succeeds despite storage");
        assert_eq!(store.placements()[0].id, "timer");
        assert_eq!(store.placements()[0].column, Column::Center);
    }

    #[test]
    fn reset_clears_persisted_layout() {
        let (mem, mut store) = store_with(Some(r#"[{"id":"B","column":"right"}]"#), abc());
        assert_eq!(store.get("B").map(|p| p.column), Some(Column::Right));
        store.reset();
        assert!(!mem.contains(LAYOUT_KEY));
        assert_eq!(store.placements(), abc().default_placements().as_slice());
    }

    #[test]
    fn queries() {
        let (_, store) = store_with(None, abc());
        assert_eq!(store.index_of("C"), Some(2));
        assert_eq!(store.index_of("Z"), None);
        assert_eq!(store.catalog(), &abc());
    }
}
