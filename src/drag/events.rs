use super::state::Point;

/// Raw input delivered by the host's pointer/gesture dispatcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer went down on the item at this index.
    PressStart(usize),
    /// The pointer moved while pressed.
    DragMove(Point),
    /// The pointer is over this candidate slot, or over no slot.
    DragOver(Option<usize>),
    /// The pointer was released over this slot, or outside every slot.
    Drop(Option<usize>),
    /// The gesture was aborted by the host.
    Cancel,
}

/// Drag lifecycle notifications for the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEvent {
    /// The item at `index` was lifted.
    Started { index: usize },
    /// The pointer is over `target`; `accepted` reflects the acceptance predicate.
    Hovered {
        source: usize,
        target: usize,
        accepted: bool,
    },
    /// The drag ended over `target`. `moved` is false for a drop onto the source slot.
    Dropped {
        source: usize,
        target: usize,
        moved: bool,
    },
    /// The drag ended without a target.
    Cancelled { source: usize },
    /// A pending press was released or wandered off before qualifying.
    PressAbandoned { index: usize },
}

/// Result of a drop that ended a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropOutcome {
    pub source: usize,
    pub target: usize,
    pub moved: bool,
}
