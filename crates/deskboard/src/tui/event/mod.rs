//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.

use crate::tui::app::App;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                            return Ok(Event::Key(key))
                        }
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore key releases, focus and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
}

/// Handles a key event by dispatching to the appropriate app method or action.
///
/// While a widget is picked up, the arrows move the drop zone instead of the
/// focus, `Space`/`Enter` drops and `Esc` cancels.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    if should_quit(key) {
        return Action::Quit;
    }

    if app.board.drag().is_dragging() {
        handle_drag_key(app, key);
        return Action::None;
    }

    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.focus_column(app.focus.column.prev()),
        KeyCode::Char('l') | KeyCode::Right => app.focus_column(app.focus.column.next()),
        KeyCode::Char('j') | KeyCode::Down => app.focus_next(),
        KeyCode::Char('k') | KeyCode::Up => app.focus_previous(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.pick_up_focused();
        }
        KeyCode::Char('r') => app.reset_layout(),
        _ => {}
    }
    Action::None
}

/// Keys while dragging.
fn handle_drag_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.step_drop_target(true),
        KeyCode::Char('k') | KeyCode::Up => app.step_drop_target(false),
        KeyCode::Char('h') | KeyCode::Left => {
            if let Some(column) = app.hovered().map(|t| t.column().prev()) {
                app.shift_drop_target(column);
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if let Some(column) = app.hovered().map(|t| t.column().next()) {
                app.shift_drop_target(column);
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.drop_dragged();
        }
        KeyCode::Esc => app.cancel_drag(),
        _ => {}
    }
}

/// Returns true if the key event should trigger application quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')))
}
