//! Drag session state machine: turns pointer input into lift, hover, drop
//! and cancel transitions, reordering the sequence on an accepted drop.

mod controller;
mod events;
mod state;

pub use controller::DragController;
pub use events::{DragEvent, DropOutcome, PointerEvent};
pub use state::{
    DRAG_SLOP, DragSession, DragState, GestureSettings, PendingPress, Point, accepts,
};
