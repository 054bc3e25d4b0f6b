//! To-do list widget.
//!
//! Open items first (newest first within each group), completed items after.
//!
//! # Styling
//!
//! - Overdue: red, `!` marker
//! - Due soon: yellow, deadline shown
//! - Completed: dimmed, crossed out

use chrono::Local;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{truncate, Widget, WidgetContext};
use crate::todo::Todo;

/// Widget listing the to-do items.
pub struct TodoListWidget;

impl TodoListWidget {
    /// Factory function for the widget registry.
    pub fn create() -> Box<dyn Widget> {
        Box::new(Self)
    }
}

impl Widget for TodoListWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        if context.todos.is_empty() {
            return vec![Line::styled(
                "(no to-dos)",
                Style::default().add_modifier(Modifier::DIM),
            )];
        }
        let open = context.todos.iter().filter(|t| !t.completed);
        let done = context.todos.iter().filter(|t| t.completed);
        open.chain(done)
            .map(|todo| todo_line(todo, width as usize, context))
            .collect()
    }

    fn id(&self) -> &'static str {
        "todoList"
    }

    fn title(&self) -> &'static str {
        "To-do List"
    }
}

fn todo_line(todo: &Todo, width: usize, context: &WidgetContext) -> Line<'static> {
    let (marker, style, suffix) = if todo.completed {
        (
            "[x] ",
            Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
            String::new(),
        )
    } else if todo.is_overdue(context.now) {
        (
            "[!] ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            " (overdue)".to_string(),
        )
    } else if todo.due_within(context.now, context.due_soon) {
        let due = todo
            .deadline
            .map(|d| d.with_timezone(&Local).format(" (due %H:%M)").to_string())
            .unwrap_or_default();
        ("[ ] ", Style::default().fg(Color::Yellow), due)
    } else {
        ("[ ] ", Style::default(), String::new())
    };

    let budget = width.saturating_sub(marker.len() + suffix.chars().count());
    let text = truncate(&todo.text, budget);
    Line::from(vec![
        Span::raw(marker),
        Span::styled(text, style),
        Span::styled(suffix, style),
    ])
}
