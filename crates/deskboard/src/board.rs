//! The three-column board.
//!
//! [`WidgetBoard`] pairs a [`LayoutStore`] with a [`DragController`] and
//! exposes what a renderer needs: the column views, the drop zones in
//! navigation order and the drag operations.

use thiserror::Error;

use crate::layout::drag::{DragController, DragStart, DropOutcome, DropTarget};
use crate::layout::placement::{self, MoveRejection};
use crate::layout::{LayoutStore, WidgetCatalog};
use crate::notify::SharedNotifier;
use crate::storage::SharedStore;
use crate::{Column, WidgetPlacement};

/// Errors from scripted moves ([`WidgetBoard::move_widget`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No widget has this id.
    #[error("Unknown widget id: {0}")]
    UnknownWidgetId(String),

    /// The anchor widget is not in the target column.
    #[error("Widget '{id}' is not in the {column} column")]
    NotInColumn {
        /// Anchor widget.
        id: String,
        /// Requested column.
        column: Column,
    },

    /// The widget is the only one in its column.
    #[error("Widget '{0}' is locked and cannot be moved to another column")]
    Locked(String),

    /// The move was refused.
    #[error(transparent)]
    Rejected(#[from] MoveRejection),
}

/// A widget slot within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot<'a> {
    /// Flat index in the placement sequence.
    pub index: usize,
    /// The placement in this slot.
    pub placement: &'a WidgetPlacement,
    /// Sole member of its column.
    pub locked: bool,
}

/// One column of the board, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    /// Which column.
    pub column: Column,
    /// Members in render order.
    pub slots: Vec<ColumnSlot<'a>>,
}

/// Layout plus drag wiring.
#[derive(Debug)]
pub struct WidgetBoard {
    store: LayoutStore,
    drag: DragController,
}

impl WidgetBoard {
    /// Wraps an existing store.
    pub fn new(store: LayoutStore, notifier: SharedNotifier) -> Self {
        Self {
            store,
            drag: DragController::new(notifier),
        }
    }

    /// Loads the persisted layout from `storage`.
    pub fn open(storage: SharedStore, catalog: WidgetCatalog, notifier: SharedNotifier) -> Self {
        Self::new(LayoutStore::open(storage, catalog), notifier)
    }

    /// The three columns in render order.
    pub fn columns(&self) -> [ColumnView<'_>; 3] {
        Column::ALL.map(|column| self.column(column))
    }

    /// A single column.
    pub fn column(&self, column: Column) -> ColumnView<'_> {
        let sequence = self.store.placements();
        let slots: Vec<_> = placement::column_members(sequence, column)
            .map(|(index, placement)| ColumnSlot {
                index,
                placement,
                locked: false,
            })
            .collect();
        let locked = slots.len() == 1;
        ColumnView {
            column,
            slots: slots
                .into_iter()
                .map(|slot| ColumnSlot { locked, ..slot })
                .collect(),
        }
    }

    /// Every drop zone: each widget slot, then the column's end zone,
    /// column by column.
    pub fn drop_targets(&self) -> Vec<DropTarget> {
        let sequence = self.store.placements();
        Column::ALL
            .into_iter()
            .flat_map(|column| {
                placement::column_members(sequence, column)
                    .map(move |(index, _)| DropTarget::Before { column, index })
                    .chain(std::iter::once(DropTarget::ColumnEnd(column)))
            })
            .collect()
    }

    /// Picks up `widget_id`.
    pub fn begin_drag(&mut self, widget_id: &str) -> DragStart {
        self.drag.begin(self.store.placements(), widget_id)
    }

    /// Sets the hovered drop zone.
    pub fn hover(&mut self, target: DropTarget) -> bool {
        self.drag.hover(target)
    }

    /// Clears the hovered drop zone.
    pub fn leave(&mut self) {
        self.drag.leave();
    }

    /// Drops the dragged widget on the hovered zone.
    pub fn release(&mut self) -> DropOutcome {
        self.drag.release(&mut self.store)
    }

    /// Abandons the current drag.
    pub fn cancel(&mut self) -> bool {
        self.drag.cancel()
    }

    /// Abandons any drag and restores the default layout.
    pub fn reset_layout(&mut self) {
        self.drag.cancel();
        self.store.reset();
        tracing::info!("Layout reset to defaults");
    }

    /// Moves `id` into `column`, in front of `before` or at the end.
    ///
    /// Runs through the same drag path as the pointer, so refusals are also
    /// reported to the notifier.
    pub fn move_widget(
        &mut self,
        id: &str,
        column: Column,
        before: Option<&str>,
    ) -> Result<DropOutcome, BoardError> {
        let target = match before {
            Some(anchor) => {
                let placement = self
                    .store
                    .get(anchor)
                    .ok_or_else(|| BoardError::UnknownWidgetId(anchor.to_string()))?;
                if placement.column != column {
                    return Err(BoardError::NotInColumn {
                        id: anchor.to_string(),
                        column,
                    });
                }
                let index = self
                    .store
                    .index_of(anchor)
                    .ok_or_else(|| BoardError::UnknownWidgetId(anchor.to_string()))?;
                // Dropping on a later widget lands behind it, so aim one slot
                // earlier to end up in front of the anchor.
                let index = match self.store.index_of(id) {
                    Some(dragged) if dragged < index => index - 1,
                    _ => index,
                };
                DropTarget::Before { column, index }
            }
            None => DropTarget::ColumnEnd(column),
        };

        self.drag.cancel();
        match self.begin_drag(id) {
            DragStart::Started | DragStart::Busy => {}
            DragStart::Unknown => return Err(BoardError::UnknownWidgetId(id.to_string())),
            DragStart::Locked if self.store.get(id).map(|p| p.column) == Some(column) => {
                // The only widget of a column can still be dropped in place.
                return Ok(DropOutcome::Unchanged);
            }
            DragStart::Locked => return Err(BoardError::Locked(id.to_string())),
        }
        self.drag.hover(target);
        match self.release() {
            DropOutcome::Rejected(MoveRejection::UnknownWidget { .. }) => {
                Err(BoardError::UnknownWidgetId(id.to_string()))
            }
            DropOutcome::Rejected(rejection) => Err(rejection.into()),
            outcome => Ok(outcome),
        }
    }

    /// Whether `id` is the sole member of its column.
    pub fn is_locked(&self, id: &str) -> bool {
        placement::is_locked(self.store.placements(), id)
    }

    /// Underlying layout.
    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Drag state.
    pub fn drag(&self) -> &DragController {
        &self.drag
    }
}
