//! Summary widget sitting above the to-do list.
//!
//! Items are entered from the command line, so this widget shows the counts
//! and the command to use.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{truncate, Widget, WidgetContext};

/// Counts and an entry hint.
pub struct AddTodoWidget;

impl AddTodoWidget {
    /// Factory function for the widget registry.
    pub fn create() -> Box<dyn Widget> {
        Box::new(Self)
    }
}

impl Widget for AddTodoWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let w = width as usize;
        let overdue = context.overdue_count();
        let overdue_style = if overdue > 0 {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        vec![
            Line::from(vec![
                Span::raw(format!("{} open, ", context.open_count())),
                Span::styled(format!("{overdue} overdue"), overdue_style),
            ]),
            Line::styled(
                truncate("deskboard todo add <text> [--deadline <when>]", w),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]
    }

    fn id(&self) -> &'static str {
        "addTodo"
    }

    fn title(&self) -> &'static str {
        "Add To-do"
    }
}
