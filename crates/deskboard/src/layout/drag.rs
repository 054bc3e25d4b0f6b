//! Drag-and-drop state machine.
//!
//! ```text
//!            begin (movable)                hover / leave
//!   Idle ─────────────────────▶ Dragging ◀──────────────┐
//!    ▲                             │  └──────────────────┘
//!    └──── release / cancel ───────┘
//! ```
//!
//! The hovered drop zone is a sub-state of `Dragging`. Hovering never touches
//! the layout; only `release` does, through [`LayoutStore::apply_move`].
//! Refusals are surfaced through the injected [`Notifier`].
//!
//! [`Notifier`]: crate::notify::Notifier

use crate::layout::placement::{self, MoveRejection};
use crate::layout::store::LayoutStore;
use crate::notify::SharedNotifier;
use crate::{Column, WidgetPlacement};

/// Shown when a drag starts on the only widget of a column.
pub const LOCKED_MESSAGE: &str = "This widget is locked and cannot be moved to another column.";

/// Shown when a drop would empty the column the widget came from.
pub const LAST_WIDGET_MESSAGE: &str = "Each column needs at least one widget!";

/// Where a dragged widget can be released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// The slot occupied by the placement at flat `index`. The dragged
    /// widget takes over that slot: it lands in front of an earlier widget
    /// and behind a later one.
    Before {
        /// Column of the slot.
        column: Column,
        /// Flat index of the placement currently in the slot.
        index: usize,
    },
    /// Below the last widget of a column (or anywhere in an empty one).
    ColumnEnd(Column),
}

impl DropTarget {
    /// Column the widget would land in.
    pub fn column(&self) -> Column {
        match self {
            DropTarget::Before { column, .. } | DropTarget::ColumnEnd(column) => *column,
        }
    }
}

/// An in-progress drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Dragged widget.
    pub widget_id: String,
    /// Column the widget was picked up from.
    pub origin_column: Column,
    /// Flat index at pick-up time.
    pub origin_index: usize,
    /// Drop zone under the pointer, if any.
    pub hover: Option<DropTarget>,
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A widget is being dragged.
    Dragging(DragSession),
}

/// Result of [`DragController::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStart {
    /// Now dragging.
    Started,
    /// The widget is the only one in its column.
    Locked,
    /// No widget has that id.
    Unknown,
    /// Another drag is already in progress.
    Busy,
}

/// Result of [`DragController::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The layout changed and was persisted.
    Moved,
    /// The drop was accepted but changed nothing (self-drop).
    Unchanged,
    /// The move was refused; the layout is untouched.
    Rejected(MoveRejection),
    /// Released outside any drop zone.
    Cancelled,
    /// No drag was in progress.
    NotDragging,
}

/// Drives drags against a [`LayoutStore`].
pub struct DragController {
    state: DragState,
    notifier: SharedNotifier,
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl DragController {
    /// Creates an idle controller reporting to `notifier`.
    pub fn new(notifier: SharedNotifier) -> Self {
        Self {
            state: DragState::Idle,
            notifier,
        }
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Returns `true` while a widget is picked up.
    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    /// Picks up `widget_id`.
    pub fn begin(&mut self, placements: &[WidgetPlacement], widget_id: &str) -> DragStart {
        if self.is_dragging() {
            return DragStart::Busy;
        }
        let Some((index, picked)) = placements
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == widget_id)
        else {
            tracing::debug!(widget_id, "Drag on unknown widget ignored");
            return DragStart::Unknown;
        };
        if placement::is_locked(placements, widget_id) {
            self.notifier.warn(LOCKED_MESSAGE);
            return DragStart::Locked;
        }
        tracing::debug!(widget_id, column = %picked.column, "Drag started");
        self.state = DragState::Dragging(DragSession {
            widget_id: widget_id.to_string(),
            origin_column: picked.column,
            origin_index: index,
            hover: None,
        });
        DragStart::Started
    }

    /// Sets the hovered drop zone. Returns `false` when idle.
    pub fn hover(&mut self, target: DropTarget) -> bool {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.hover = Some(target);
                true
            }
            DragState::Idle => false,
        }
    }

    /// Clears the hovered drop zone.
    pub fn leave(&mut self) {
        if let DragState::Dragging(session) = &mut self.state {
            session.hover = None;
        }
    }

    /// Abandons the drag. Returns `false` when idle.
    pub fn cancel(&mut self) -> bool {
        matches!(std::mem::take(&mut self.state), DragState::Dragging(_))
    }

    /// Drops onto the hovered zone. The controller is idle afterwards,
    /// whatever the outcome.
    pub fn release(&mut self, store: &mut LayoutStore) -> DropOutcome {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DropOutcome::NotDragging;
        };
        let Some(target) = session.hover else {
            return DropOutcome::Cancelled;
        };
        // The layout may have been reset or reloaded since pick-up.
        let Some(drag_index) = store.index_of(&session.widget_id) else {
            return DropOutcome::Rejected(MoveRejection::UnknownWidget {
                index: session.origin_index,
            });
        };
        let hover_index = match target {
            DropTarget::Before { index, .. } => index,
            DropTarget::ColumnEnd(_) => store.placements().len(),
        };

        let before = store.placements().to_vec();
        match store.apply_move(
            drag_index,
            hover_index,
            session.origin_column,
            target.column(),
        ) {
            Ok(after) if after == before.as_slice() => DropOutcome::Unchanged,
            Ok(_) => DropOutcome::Moved,
            Err(rejection @ MoveRejection::LastWidgetInColumn { .. }) => {
                tracing::debug!(%rejection, "Drop refused");
                self.notifier.warn(LAST_WIDGET_MESSAGE);
                DropOutcome::Rejected(rejection)
            }
            Err(rejection) => DropOutcome::Rejected(rejection),
        }
    }
}
