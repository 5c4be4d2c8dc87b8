use std::time::Duration;

/// Distance in logical pixels a pending press may wander before it stops
/// counting as a sustained press.
pub const DRAG_SLOP: f32 = 8.0;

/// Pointer position in the host's logical coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// How a press qualifies as the start of a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSettings {
    /// How long a press must be held before the item lifts. Zero lifts on press.
    pub hold_delay: Duration,
    /// Movement allowed while waiting for `hold_delay`.
    pub slop: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            hold_delay: Duration::ZERO,
            slop: DRAG_SLOP,
        }
    }
}

/// A press that has not qualified as a drag yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingPress {
    pub index: usize,
    pub origin: Option<Point>,
    pub held: Duration,
}

impl PendingPress {
    pub(super) fn new(index: usize) -> Self {
        Self {
            index,
            origin: None,
            held: Duration::ZERO,
        }
    }
}

/// The single in-progress drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<K> {
    source_index: usize,
    key: K,
    pointer: Option<Point>,
    hover: Option<usize>,
}

impl<K> DragSession<K> {
    pub(super) fn new(source_index: usize, key: K, pointer: Option<Point>) -> Self {
        Self {
            source_index,
            key,
            pointer,
            hover: None,
        }
    }

    /// Index the dragged item occupied when the drag began.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Identity of the dragged item.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Slot the dragged item occupies in `items` now. Differs from
    /// [`DragSession::source_index`] once the order changed mid-drag.
    pub fn current_source<T>(&self, items: &[T], key_of: impl Fn(&T) -> K) -> usize
    where
        K: PartialEq,
    {
        items
            .iter()
            .position(|item| key_of(item) == self.key)
            .unwrap_or(self.source_index)
    }

    /// Last known pointer position, used to place the feedback visual.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Candidate the pointer is currently over.
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    pub(super) fn set_pointer(&mut self, pointer: Point) {
        self.pointer = Some(pointer);
    }

    pub(super) fn set_hover(&mut self, hover: Option<usize>) {
        self.hover = hover;
    }

    pub(super) fn into_key(self) -> K {
        self.key
    }
}

/// Drag lifecycle. At most one session exists at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum DragState<K> {
    Idle,
    Pressed(PendingPress),
    Dragging(DragSession<K>),
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        DragState::Idle
    }
}

impl<K> DragState<K> {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn session(&self) -> Option<&DragSession<K>> {
        match self {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// True when the item keyed `key` is being dragged.
    pub fn is_dragging_key(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.session().is_some_and(|session| session.key == *key)
    }
}

/// A drop onto `target` is a reorder only when it names a different slot.
pub fn accepts(source: usize, target: usize) -> bool {
    target != source
}
