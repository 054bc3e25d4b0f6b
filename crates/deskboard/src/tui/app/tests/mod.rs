pub(crate) use super::*;
pub(crate) use crate::tui::test_utils::{key, make_app, make_app_with_store, render_board_to_buffer};
pub(crate) use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};


/// Ids in `column`, top to bottom.
pub(crate) fn column_ids(app: &App, column: Column) -> Vec<String> {
    app.board
        .column(column)
        .slots
        .iter()
        .map(|slot| slot.placement.id.clone())
        .collect()
}

/// A left-button mouse event at `(column, row)`.
pub(crate) fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}
