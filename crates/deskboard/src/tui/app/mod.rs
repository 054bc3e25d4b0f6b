//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.

use crate::board::WidgetBoard;
use crate::layout::{DragStart, DropOutcome, DropTarget, WidgetCatalog};
use crate::memo::{Memo, MemoPad};
use crate::notify::StatusLine;
use crate::storage::SharedStore;
use crate::todo::{Todo, TodoList};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render_board;
use crate::widgets::WidgetRegistry;
use crate::Column;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Position, Rect};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

/// To-dos and memos are re-read every this many ticks, so items added from
/// another shell show up without a restart.
const DATA_REFRESH_TICKS: u64 = 4;

/// Keyboard focus: a column and a row within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    /// Focused column.
    pub column: Column,
    /// Row within the column.
    pub row: usize,
}

/// Core application state for the TUI.
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed.
    pub tick_count: u64,
    /// Layout and drag state.
    pub board: WidgetBoard,
    /// Widget renderers.
    pub registry: WidgetRegistry,
    /// Snapshot of the to-do list.
    pub todos: Vec<Todo>,
    /// Snapshot of the memo pad.
    pub memos: Vec<Memo>,
    /// Keyboard focus.
    pub focus: Focus,
    /// Transient warnings shown in the footer.
    pub status: StatusLine,
    /// Window for the "due soon" marker.
    pub due_soon: Duration,
    /// Drop zones drawn in the last render pass, for mouse hit-testing.
    pub drop_areas: Vec<(DropTarget, Rect)>,
    storage: SharedStore,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("should_quit", &self.should_quit)
            .field("tick_count", &self.tick_count)
            .field("board", &self.board)
            .field("focus", &self.focus)
            .field("todos", &self.todos.len())
            .field("memos", &self.memos.len())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates the app over `storage`, loading layout, to-dos and memos.
    ///
    /// Rejected drags are reported to `status`.
    pub fn new(storage: SharedStore, status: StatusLine, due_soon: Duration) -> Self {
        let board = WidgetBoard::open(
            storage.clone(),
            WidgetCatalog::builtin(),
            Arc::new(status.clone()),
        );
        let mut app = Self {
            should_quit: false,
            tick_count: 0,
            board,
            registry: WidgetRegistry::new(),
            todos: Vec::new(),
            memos: Vec::new(),
            focus: Focus {
                column: Column::Center,
                row: 0,
            },
            status,
            due_soon,
            drop_areas: Vec::new(),
            storage,
        };
        app.refresh_data();
        app
    }

    /// Re-reads to-dos and memos. Failures keep the previous snapshot.
    pub fn refresh_data(&mut self) {
        match TodoList::load(self.storage.clone()) {
            Ok(list) => self.todos = list.items().to_vec(),
            Err(e) => tracing::warn!("Failed to load to-dos: {e}"),
        }
        match MemoPad::load(self.storage.clone()) {
            Ok(pad) => self.memos = pad.list().to_vec(),
            Err(e) => tracing::warn!("Failed to load memos: {e}"),
        }
    }

    /// Number of widgets in `column`.
    fn column_len(&self, column: Column) -> usize {
        self.board.column(column).slots.len()
    }

    /// Id of the focused widget.
    pub fn focused_widget(&self) -> Option<String> {
        self.board
            .column(self.focus.column)
            .slots
            .get(self.focus.row)
            .map(|slot| slot.placement.id.clone())
    }

    /// Keeps the focused row inside its column.
    fn clamp_focus(&mut self) {
        let last = self.column_len(self.focus.column).saturating_sub(1);
        self.focus.row = self.focus.row.min(last);
    }

    /// Moves focus one column left or right.
    pub fn focus_column(&mut self, column: Column) {
        self.focus.column = column;
        self.clamp_focus();
    }

    /// Moves focus down within the column.
    pub fn focus_next(&mut self) {
        self.focus.row += 1;
        self.clamp_focus();
    }

    /// Moves focus up within the column.
    pub fn focus_previous(&mut self) {
        self.focus.row = self.focus.row.saturating_sub(1);
    }

    /// Focuses the widget `id`, wherever it is now.
    pub fn focus_widget(&mut self, id: &str) {
        let Some(column) = self.board.store().get(id).map(|p| p.column) else {
            return;
        };
        if let Some(row) = self
            .board
            .column(column)
            .slots
            .iter()
            .position(|slot| slot.placement.id == id)
        {
            self.focus = Focus { column, row };
        }
    }

    /// Picks up the focused widget and hovers its own slot.
    pub fn pick_up_focused(&mut self) -> DragStart {
        let Some(id) = self.focused_widget() else {
            return DragStart::Unknown;
        };
        let outcome = self.board.begin_drag(&id);
        if outcome == DragStart::Started {
            if let Some(index) = self.board.store().index_of(&id) {
                self.board.hover(DropTarget::Before {
                    column: self.focus.column,
                    index,
                });
            }
        }
        outcome
    }

    /// Drops the dragged widget and keeps focus on it.
    pub fn drop_dragged(&mut self) -> DropOutcome {
        let dragged = self.board.drag().session().map(|s| s.widget_id.clone());
        let outcome = self.board.release();
        if let Some(id) = dragged {
            self.focus_widget(&id);
        }
        self.clamp_focus();
        outcome
    }

    /// Abandons the drag.
    pub fn cancel_drag(&mut self) {
        self.board.cancel();
    }

    /// Restores the default layout.
    pub fn reset_layout(&mut self) {
        self.board.reset_layout();
        self.clamp_focus();
    }

    /// Currently hovered drop zone.
    pub fn hovered(&self) -> Option<DropTarget> {
        self.board.drag().session().and_then(|s| s.hover)
    }

    /// Steps the hovered drop zone through [`WidgetBoard::drop_targets`].
    pub fn step_drop_target(&mut self, forward: bool) {
        let targets = self.board.drop_targets();
        if targets.is_empty() {
            return;
        }
        let current = self
            .hovered()
            .and_then(|h| targets.iter().position(|t| *t == h));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(targets.len() - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.board.hover(targets[next]);
    }

    /// Moves the hovered drop zone into `column`, keeping the row if it can.
    pub fn shift_drop_target(&mut self, column: Column) {
        let row = self
            .hovered()
            .map(|h| self.row_of_target(h))
            .unwrap_or_default();
        let in_column: Vec<DropTarget> = self
            .board
            .drop_targets()
            .into_iter()
            .filter(|t| t.column() == column)
            .collect();
        if let Some(target) = in_column.get(row.min(in_column.len().saturating_sub(1))) {
            self.board.hover(*target);
        }
    }

    /// Row of a drop zone within its column; the end zone is one past the last widget.
    fn row_of_target(&self, target: DropTarget) -> usize {
        let view = self.board.column(target.column());
        match target {
            DropTarget::Before { index, .. } => view
                .slots
                .iter()
                .position(|slot| slot.index == index)
                .unwrap_or(view.slots.len()),
            DropTarget::ColumnEnd(_) => view.slots.len(),
        }
    }

    /// Drop zone under a terminal position.
    pub fn target_at(&self, column: u16, row: u16) -> Option<DropTarget> {
        let pos = Position::new(column, row);
        self.drop_areas
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|(target, _)| *target)
    }

    /// Handles a mouse event: press picks up, motion hovers, release drops.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(DropTarget::Before { index, .. }) = self.target_at(mouse.column, mouse.row)
                {
                    let Some(id) = self.board.store().placements().get(index).map(|p| p.id.clone())
                    else {
                        return;
                    };
                    self.focus_widget(&id);
                    self.pick_up_focused();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.board.drag().is_dragging() {
                    return;
                }
                match self.target_at(mouse.column, mouse.row) {
                    Some(target) => {
                        self.board.hover(target);
                    }
                    None => self.board.leave(),
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.board.drag().is_dragging() {
                    self.drop_dragged();
                }
            }
            _ => {}
        }
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self, tick_rate: Duration) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop(tick_rate).await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self, tick_rate: Duration) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(tick_rate);
        let mut reader = EventStream::new();

        terminal.draw(|frame| render_board(frame, self))?;
        loop {
            let event = event_handler.next(&mut reader).await?;
            let should_render = match event {
                Event::Key(key) => {
                    match handle_key_event(self, key) {
                        Action::Quit => {
                            self.should_quit = true;
                            return Ok(());
                        }
                        Action::None => {}
                    }
                    true
                }
                Event::Mouse(mouse) => {
                    self.handle_mouse_event(mouse);
                    true
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.status.expire();
                    if self.tick_count % DATA_REFRESH_TICKS == 0 {
                        self.refresh_data();
                    }
                    true
                }
                Event::Resize(_, _) => true,
            };

            if should_render {
                terminal.draw(|frame| render_board(frame, self))?;
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests;
