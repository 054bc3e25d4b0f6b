//! Memo pad widget. One line per memo, first line of its content.

use ratatui::{
    style::{Modifier, Style},
    text::Line,
};

use super::{truncate, Widget, WidgetContext};

/// Widget listing the memo pad.
pub struct MemoWidget;

impl MemoWidget {
    /// Factory function for the widget registry.
    pub fn create() -> Box<dyn Widget> {
        Box::new(Self)
    }
}

impl Widget for MemoWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        if context.memos.is_empty() {
            return vec![Line::styled(
                "(no memos)",
                Style::default().add_modifier(Modifier::DIM),
            )];
        }
        let budget = (width as usize).saturating_sub(2);
        context
            .memos
            .iter()
            .map(|memo| {
                let first = memo.content.lines().next().unwrap_or_default();
                let more = memo.content.lines().nth(1).is_some();
                let text = if more {
                    truncate(&format!("{first} \u{2026}"), budget)
                } else {
                    truncate(first, budget)
                };
                Line::raw(format!("\u{2022} {text}"))
            })
            .collect()
    }

    fn id(&self) -> &'static str {
        "memo"
    }

    fn title(&self) -> &'static str {
        "Memo"
    }
}
