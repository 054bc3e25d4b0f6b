//! Layout system for the board.
//!
//! The board is a flat, ordered sequence of [`WidgetPlacement`]s. A column's
//! contents are that sequence filtered by column, so moving a widget is a
//! remove and reinsert on the flat sequence.
//!
//! - [`catalog`]: the default widget set and its columns.
//! - [`placement`]: pure move rules (column non-empty invariant, self-drop).
//! - [`store`]: the canonical sequence, load/merge and write-through persistence.
//! - [`drag`]: the drag-and-drop state machine driving the store.
//!
//! [`WidgetPlacement`]: crate::WidgetPlacement

pub mod catalog;
pub mod drag;
pub mod placement;
pub mod store;

pub use catalog::{CatalogEntry, CatalogError, WidgetCatalog};
pub use drag::{DragController, DragSession, DragStart, DragState, DropOutcome, DropTarget};
pub use placement::{attempt_move, column_count, column_members, is_locked, MoveRejection};
pub use store::LayoutStore;
