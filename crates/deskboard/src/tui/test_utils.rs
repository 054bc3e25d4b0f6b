//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helpers for creating test terminals, extracting buffer content,
//! asserting colors, and building apps over in-memory storage.

use crate::notify::StatusLine;
use crate::storage::{MemoryStore, SharedStore};
use crate::tui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
use std::sync::Arc;
use std::time::Duration;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    (0..area.height).find(|&row| row_contains(buffer, row, text))
}

/// Column (in cells) of the first occurrence of `text` in `row`.
pub fn find_col_with_text(buffer: &Buffer, row: u16, text: &str) -> Option<u16> {
    let cells: Vec<&str> = (0..buffer.area().width)
        .map(|col| buffer.cell((col, row)).map(|c| c.symbol()).unwrap_or(" "))
        .collect();
    let first = text.chars().next()?.to_string();
    (0..cells.len())
        .find(|&start| {
            cells[start] == first
                && text
                    .chars()
                    .enumerate()
                    .all(|(i, ch)| cells.get(start + i).is_some_and(|c| *c == ch.to_string()))
        })
        .map(|col| col as u16)
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Builds an app over a fresh in-memory store.
pub fn make_app() -> App {
    make_app_with_store(Arc::new(MemoryStore::new()))
}

/// Builds an app over `storage`.
pub fn make_app_with_store(storage: SharedStore) -> App {
    App::new(
        storage,
        StatusLine::new(Duration::from_secs(2)),
        Duration::from_secs(24 * 3600),
    )
}

/// A key press without modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Renders the full board to a buffer and returns the buffer for inspection.
pub fn render_board_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| {
            crate::tui::ui::render_board(frame, app);
        })
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_terminal_creates_terminal() {
        let terminal = test_terminal(80, 24);
        let size = terminal.size().expect("should have size");
        assert_eq!(size.width, 80);
        assert_eq!(size.height, 24);
    }

    #[test]
    fn test_row_text_extracts_row_content() {
        let mut terminal = test_terminal(20, 5);
        terminal
            .draw(|frame| {
                let area = frame.area();
                let para = ratatui::widgets::Paragraph::new("Hello World");
                frame.render_widget(para, area);
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 0).contains("Hello World"));
        assert!(row_contains(buffer, 0, "World"));
        assert!(!row_contains(buffer, 0, "Missing"));
        assert_eq!(find_col_with_text(buffer, 0, "World"), Some(6));
        assert_eq!(find_row_with_text(buffer, "Hello"), Some(0));
        assert_eq!(row_text(buffer, 9), "");
    }
}
