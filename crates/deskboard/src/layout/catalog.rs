//! The default widget set.
//!
//! The catalog is the source of truth for which widget ids exist and where
//! they go on a fresh board. Persisted layouts are merged against it, never
//! trusted on their own.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Column, WidgetPlacement, WidgetWidth};

/// Problems with a hand-built catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The same id appears twice.
    #[error("Duplicate widget id in catalog: {0}")]
    DuplicateId(String),

    /// A column has no default widget, so a fresh board would break the
    /// non-empty column rule.
    #[error("Catalog leaves the {0} column empty")]
    EmptyColumn(Column),
}

/// One widget in the default set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Widget id.
    pub id: String,
    /// Column on a fresh board.
    pub column: Column,
    /// Width on a fresh board.
    pub width: WidgetWidth,
}

impl CatalogEntry {
    /// Creates an entry with normal width.
    pub fn new(id: impl Into<String>, column: Column) -> Self {
        Self {
            id: id.into(),
            column,
            width: WidgetWidth::Normal,
        }
    }

    /// Returns the entry with the given width.
    pub fn with_width(mut self, width: WidgetWidth) -> Self {
        self.width = width;
        self
    }

    /// The entry as a placement in its default column.
    pub fn placement(&self) -> WidgetPlacement {
        WidgetPlacement::new(self.id.clone(), self.column).with_width(self.width)
    }
}

/// Ordered default widget set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCatalog {
    entries: Vec<CatalogEntry>,
}

impl WidgetCatalog {
    /// Validates and wraps `entries`. Order is the default render order.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        if let Some(empty) = Column::ALL
            .into_iter()
            .find(|c| !entries.iter().any(|e| e.column == *c))
        {
            return Err(CatalogError::EmptyColumn(empty));
        }
        Ok(Self { entries })
    }

    /// The built-in board: clock, calendar, background and timer on the
    /// left, the to-do widgets in the centre and the memo pad on the right.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("clock", Column::Left),
                CatalogEntry::new("calendar", Column::Left),
                CatalogEntry::new("background", Column::Left),
                CatalogEntry::new("timer", Column::Left),
                CatalogEntry::new("addTodo", Column::Center),
                CatalogEntry::new("todoList", Column::Center),
                CatalogEntry::new("memo", Column::Right),
            ],
        }
    }

    /// All entries in default order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns `true` if `id` is a known widget.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The default placement sequence.
    pub fn default_placements(&self) -> Vec<WidgetPlacement> {
        self.entries.iter().map(CatalogEntry::placement).collect()
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for WidgetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
