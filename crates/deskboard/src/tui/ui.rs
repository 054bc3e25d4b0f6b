//! Main rendering orchestration for the TUI board.
//!
//! Provides the top-level `render_board` function that composes the header,
//! the three widget columns and the footer.

use crate::board::ColumnView;
use crate::layout::DropTarget;
use crate::tui::app::App;
use crate::widgets::WidgetContext;
use crate::{Column, WidgetWidth};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Header text displayed at the top of the board.
pub const HEADER_TEXT: &str = "deskboard";

/// Footer hints while browsing.
pub const FOOTER_TEXT: &str =
    "[h/l] Column  [j/k] Widget  [Space] Pick up  [r] Reset layout  [q] Quit";

/// Footer hints while a widget is picked up.
pub const FOOTER_DRAG_TEXT: &str = "[arrows] Choose drop zone  [Space] Drop  [Esc] Cancel";

/// Suffix on the title of a widget that cannot leave its column.
pub const LOCK_MARKER: &str = "[locked]";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Renders the full board: header, three columns and footer.
///
/// Updates `app.drop_areas` with the area of every drop zone for mouse
/// hit-testing.
pub fn render_board(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // columns
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);

    let mut drop_areas = Vec::new();
    for (column, column_area) in Column::ALL.into_iter().zip(columns.iter()) {
        render_column(frame, app, column, *column_area, &mut drop_areas);
    }
    app.drop_areas = drop_areas;

    frame.render_widget(Paragraph::new(footer_line(app)), chunks[2]);
}

/// Title on the left, drag state or version on the right.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let right = match app.board.drag().session() {
        Some(session) => Span::styled(
            format!("moving {}", session.widget_id),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled(VERSION_TEXT, Style::default().fg(Color::DarkGray)),
    };
    let padding = (area.width as usize)
        .saturating_sub(HEADER_TEXT.len())
        .saturating_sub(right.content.chars().count());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(HEADER_TEXT, Style::default().fg(Color::Cyan)),
        Span::raw(" ".repeat(padding)),
        right,
    ]));
    frame.render_widget(header, area);
}

/// Stacks a column's widgets top to bottom; what is left below is the end zone.
fn render_column(
    frame: &mut Frame,
    app: &App,
    column: Column,
    area: Rect,
    drop_areas: &mut Vec<(DropTarget, Rect)>,
) {
    let view: ColumnView<'_> = app.board.column(column);
    let ctx = WidgetContext::new(&app.todos, &app.memos).with_due_soon(app.due_soon);
    let hovered = app.hovered();
    let dragged = app.board.drag().session().map(|s| s.widget_id.as_str());

    let mut bodies = Vec::with_capacity(view.slots.len());
    for slot in &view.slots {
        let width = slot_width(column, slot.placement.width, area.width);
        let inner_width = width.saturating_sub(2);
        let (title, lines) = match app.registry.create(&slot.placement.id) {
            Some(widget) => (widget.title().to_string(), widget.render(inner_width, &ctx)),
            None => (
                slot.placement.id.clone(),
                vec![Line::raw(format!("[{}]", slot.placement.id))],
            ),
        };
        bodies.push((title, lines, width));
    }

    let mut constraints: Vec<Constraint> = bodies
        .iter()
        .map(|(_, lines, _)| Constraint::Length(lines.len() as u16 + 2))
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (row, (slot, (title, lines, width))) in view.slots.iter().zip(bodies).enumerate() {
        let slot_area = Rect {
            width: width.min(rows[row].width),
            ..rows[row]
        };
        let target = DropTarget::Before {
            column,
            index: slot.index,
        };
        drop_areas.push((target, rows[row]));

        let focused = app.focus.column == column && app.focus.row == row;
        let border_style = if hovered == Some(target) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if dragged == Some(slot.placement.id.as_str()) {
            Style::default().fg(Color::Yellow)
        } else if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut title_spans = vec![Span::raw(format!(" {title} "))];
        if slot.locked {
            title_spans.push(Span::styled(
                format!("{LOCK_MARKER} "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if hovered == Some(target) {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .title(Line::from(title_spans));
        frame.render_widget(Paragraph::new(lines).block(block), slot_area);
    }

    let end_area = rows[view.slots.len()];
    let end_target = DropTarget::ColumnEnd(column);
    if end_area.height > 0 {
        drop_areas.push((end_target, end_area));
    }
    if dragged.is_some() && end_area.height > 0 {
        let style = if hovered == Some(end_target) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let hint = Paragraph::new(Line::styled(format!("drop at end of {column}"), style))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            );
        frame.render_widget(hint, end_area);
    }
}

/// Normal-width centre widgets take two thirds of the column.
fn slot_width(column: Column, width: WidgetWidth, available: u16) -> u16 {
    match (column, width) {
        (Column::Center, WidgetWidth::Normal) => (available as u32 * 2 / 3) as u16,
        _ => available,
    }
}

/// Status message if one is live, otherwise the key hints.
fn footer_line(app: &App) -> Line<'static> {
    if let Some(message) = app.status.current() {
        return Line::from(Span::styled(message, Style::default().fg(Color::Yellow)));
    }
    let hints = if app.board.drag().is_dragging() {
        FOOTER_DRAG_TEXT
    } else {
        FOOTER_TEXT
    };
    Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
}
