//! deskboard library
//!
//! A personal productivity widget board: clock, calendar, timer, memo pad,
//! to-do list and background picker arranged in three columns that can be
//! rearranged by drag-and-drop. The layout, to-dos and memos are persisted in
//! a client-scoped key-value store.
//!
//! The interesting parts live in [`layout`] (placement engine, layout store,
//! drag state machine) and [`todo`] (deadline normalization and overdue
//! filtering). [`board`] glues the layout pieces together for the renderer in
//! [`tui`].

use std::fmt;
use std::str::FromStr;

/// Three-column board view and drag wiring.
pub mod board;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Widget placement engine, layout store and drag controller.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Memo pad entries.
pub mod memo;

/// User-facing warning sinks.
pub mod notify;

/// Client-scoped key-value persistence.
pub mod storage;

/// To-do items with normalized deadlines.
pub mod todo;

/// TUI module providing the terminal rendition of the board.
pub mod tui;

/// Widget renderers for the board.
pub mod widgets;

/// Storage key holding the persisted widget layout.
pub const LAYOUT_KEY: &str = "widgetsLayout";

/// Storage key holding the to-do list.
pub const TODOS_KEY: &str = "todos";

/// Storage key holding the memo pad.
pub const MEMOS_KEY: &str = "memos";

/// One of the three vertical regions of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Narrow left column.
    Left,
    /// Wide centre column.
    Center,
    /// Narrow right column.
    Right,
}

impl Column {
    /// All columns in render order.
    pub const ALL: [Column; 3] = [Column::Left, Column::Center, Column::Right];

    /// Position of this column in [`Column::ALL`].
    pub fn position(self) -> usize {
        match self {
            Column::Left => 0,
            Column::Center => 1,
            Column::Right => 2,
        }
    }

    /// Column to the left, saturating at [`Column::Left`].
    pub fn prev(self) -> Self {
        match self {
            Column::Left | Column::Center => Column::Left,
            Column::Right => Column::Center,
        }
    }

    /// Column to the right, saturating at [`Column::Right`].
    pub fn next(self) -> Self {
        match self {
            Column::Left => Column::Center,
            Column::Center | Column::Right => Column::Right,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Column::Left => "left",
            Column::Center => "center",
            Column::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing Column from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColumnError(pub String);

impl fmt::Display for ParseColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid column: {} (expected left, center or right)", self.0)
    }
}

impl std::error::Error for ParseColumnError {}

impl FromStr for Column {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Column::Left),
            "center" | "centre" => Ok(Column::Center),
            "right" => Ok(Column::Right),
            _ => Err(ParseColumnError(s.to_string())),
        }
    }
}

/// Display width hint for a widget. Does not affect placement rules.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WidgetWidth {
    /// Regular width (two thirds of the centre column).
    #[default]
    Normal,
    /// Full column width.
    Wide,
}

impl fmt::Display for WidgetWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetWidth::Normal => write!(f, "normal"),
            WidgetWidth::Wide => write!(f, "wide"),
        }
    }
}

/// A widget's assigned column and width.
///
/// Relative order is not stored here; it is the position of the placement in
/// the board's flat sequence, filtered by column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WidgetPlacement {
    /// Stable widget identifier, unique across the board.
    pub id: String,
    /// Column the widget currently occupies.
    pub column: Column,
    /// Display hint.
    #[serde(default)]
    pub width: WidgetWidth,
}

impl WidgetPlacement {
    /// Creates a placement with normal width.
    pub fn new(id: impl Into<String>, column: Column) -> Self {
        Self {
            id: id.into(),
            column,
            width: WidgetWidth::Normal,
        }
    }

    /// Returns the placement with the given width.
    pub fn with_width(mut self, width: WidgetWidth) -> Self {
        self.width = width;
        self
    }
}

#[cfg(test)]
mod tests;
