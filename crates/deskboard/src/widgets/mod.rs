//! Widget renderers for the board.
//!
//! This module defines the `Widget` trait every board widget implements and
//! the `WidgetRegistry` that maps catalog ids to factories. The layout
//! engine never looks at widgets; the renderer asks the registry for the
//! widget behind each placement.
//!
//! # Example
//!
//! ```
//! use deskboard::widgets::{WidgetContext, WidgetRegistry};
//!
//! let registry = WidgetRegistry::new();
//! let widget = registry.create("clock").expect("clock widget exists");
//! let ctx = WidgetContext::new(&[], &[]);
//! let lines = widget.render(20, &ctx);
//! assert_eq!(lines[0].to_string(), "[clock]");
//! ```

pub mod add_todo;
pub mod context;
pub mod memo;
pub mod todo_list;

pub use context::WidgetContext;

use ratatui::text::Line;
use std::collections::HashMap;

/// Trait for board widgets.
///
/// A widget renders a block of lines given a width constraint and the shared
/// context. Widgets must be `Send + Sync` so a registry can be shared.
pub trait Widget: Send + Sync {
    /// Render the widget body. The caller draws the border and title.
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>>;

    /// Catalog id this widget renders.
    fn id(&self) -> &'static str;

    /// Title shown in the widget border.
    fn title(&self) -> &'static str;
}

/// Factory function type for creating widget instances.
pub type WidgetFactory = fn() -> Box<dyn Widget>;

/// Registry mapping widget identifiers to factory functions.
///
/// ```
/// use deskboard::widgets::WidgetRegistry;
///
/// let registry = WidgetRegistry::new();
/// assert!(registry.create("todoList").is_some());
/// assert!(registry.create("nonexistent").is_none());
/// ```
pub struct WidgetRegistry {
    factories: HashMap<&'static str, WidgetFactory>,
}

impl WidgetRegistry {
    /// Creates a registry with every built-in widget.
    ///
    /// `todoList`, `addTodo` and `memo` render real content; `clock`,
    /// `calendar`, `timer` and `background` render a placeholder.
    pub fn new() -> Self {
        let mut reg = Self {
            factories: HashMap::new(),
        };
        reg.register("todoList", todo_list::TodoListWidget::create);
        reg.register("addTodo", add_todo::AddTodoWidget::create);
        reg.register("memo", memo::MemoWidget::create);
        for id in ["clock", "calendar", "timer", "background"] {
            reg.register(id, placeholder_factory(id));
        }
        reg
    }

    /// Register a widget factory for the given identifier.
    ///
    /// Overwrites any existing factory for the same ID.
    pub fn register(&mut self, id: &'static str, factory: WidgetFactory) {
        self.factories.insert(id, factory);
    }

    /// Create a widget instance by identifier.
    ///
    /// Returns `None` if no factory is registered for the given ID.
    pub fn create(&self, id: &str) -> Option<Box<dyn Widget>> {
        self.factories.get(id).map(|f| f())
    }

    /// All registered identifiers. The order is not guaranteed.
    pub fn available_ids(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncates to `max_chars`, ending in an ellipsis when cut.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else if max_chars <= 1 {
        text.chars().take(max_chars).collect()
    } else {
        let kept: String = text.chars().take(max_chars - 1).collect();
        format!("{kept}\u{2026}")
    }
}

// ---------------------------------------------------------------------------
// Placeholder widget for content this board does not provide
// ---------------------------------------------------------------------------

/// Renders `[<id>]`. Stands in for the clock, calendar, timer and
/// background picker.
struct PlaceholderWidget {
    widget_id: &'static str,
    title: &'static str,
}

impl Widget for PlaceholderWidget {
    fn render(&self, width: u16, _context: &WidgetContext) -> Vec<Line<'static>> {
        vec![Line::raw(truncate(
            &format!("[{}]", self.widget_id),
            width as usize,
        ))]
    }

    fn id(&self) -> &'static str {
        self.widget_id
    }

    fn title(&self) -> &'static str {
        self.title
    }
}

/// A concrete fn pointer per placeholder id; a fn cannot capture `id`.
fn placeholder_factory(id: &'static str) -> WidgetFactory {
    match id {
        "clock" => || {
            Box::new(PlaceholderWidget {
                widget_id: "clock",
                title: "Clock",
            })
        },
        "calendar" => || {
            Box::new(PlaceholderWidget {
                widget_id: "calendar",
                title: "Calendar",
            })
        },
        "timer" => || {
            Box::new(PlaceholderWidget {
                widget_id: "timer",
                title: "Timer",
            })
        },
        "background" => || {
            Box::new(PlaceholderWidget {
                widget_id: "background",
                title: "Background",
            })
        },
        _ => || {
            Box::new(PlaceholderWidget {
                widget_id: "unknown",
                title: "Unknown",
            })
        },
    }
}
