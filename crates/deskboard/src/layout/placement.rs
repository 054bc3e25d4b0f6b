//! Pure move rules for the placement sequence.
//!
//! Nothing here touches storage or mutates its input: [`attempt_move`] takes
//! the current sequence and returns either a new one or the reason the move
//! was refused.

use thiserror::Error;

use crate::{Column, WidgetPlacement};

/// Why a move was refused. Neither case is fatal; the sequence is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// The move would leave a column with no widgets.
    #[error("Each column needs at least one widget ({column} would be empty)")]
    LastWidgetInColumn {
        /// Column that would be emptied.
        column: Column,
    },

    /// The drag index does not reference a placement.
    #[error("No widget at index {index}")]
    UnknownWidget {
        /// Offending index.
        index: usize,
    },
}

/// Placements in `column`, in sequence order, with their flat indices.
pub fn column_members(
    sequence: &[WidgetPlacement],
    column: Column,
) -> impl Iterator<Item = (usize, &WidgetPlacement)> {
    sequence
        .iter()
        .enumerate()
        .filter(move |(_, p)| p.column == column)
}

/// Number of placements in `column`.
pub fn column_count(sequence: &[WidgetPlacement], column: Column) -> usize {
    sequence.iter().filter(|p| p.column == column).count()
}

/// A widget is locked when it is the only one in its column.
pub fn is_locked(sequence: &[WidgetPlacement], id: &str) -> bool {
    sequence
        .iter()
        .find(|p| p.id == id)
        .is_some_and(|p| column_count(sequence, p.column) == 1)
}

/// Moves the placement at `drag_index` into `target_column` at `hover_index`.
///
/// `hover_index` is read against the sequence after the dragged placement has
/// been removed and is clamped to its length, so `sequence.len()` appends.
/// `source_column` comes from the caller and may be stale; the column the
/// placement actually occupies is checked as well.
pub fn attempt_move(
    sequence: &[WidgetPlacement],
    drag_index: usize,
    hover_index: usize,
    source_column: Column,
    target_column: Column,
) -> Result<Vec<WidgetPlacement>, MoveRejection> {
    let Some(dragged) = sequence.get(drag_index) else {
        return Err(MoveRejection::UnknownWidget { index: drag_index });
    };

    for column in [source_column, dragged.column] {
        if column != target_column && column_count(sequence, column) == 1 {
            return Err(MoveRejection::LastWidgetInColumn { column });
        }
    }

    if drag_index == hover_index && source_column == target_column {
        return Ok(sequence.to_vec());
    }

    let mut next = sequence.to_vec();
    let mut moved = next.remove(drag_index);
    moved.column = target_column;
    let at = hover_index.min(next.len());
    next.insert(at, moved);
    Ok(next)
}
