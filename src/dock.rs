//! Host-facing façade over the reorderable item row.
//!
//! A [`Dock`] owns the sequence, the drag session and the feedback animator,
//! plus the caller-supplied key extraction and render callbacks. Hosts feed it
//! [`PointerEvent`]s and frame deltas and read back one [`ItemFrame`] per item.

use std::collections::BTreeSet;
use std::fmt::{self, Debug};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::drag::{
    DragController, DragEvent, DragState, DropOutcome, GestureSettings, Point, PointerEvent,
    accepts,
};
use crate::feedback::{FeedbackAnimator, FeedbackEvent, FeedbackSettings};
use crate::observers::{Observers, SubscriptionId};
use crate::sequence::{SequenceError, SequenceEvent, SequenceStore};

/// Errors reported by [`Dock`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DockError {
    /// A move or press referenced a slot that does not exist.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    /// Two items produced the same key.
    #[error("Duplicate item key {key}")]
    DuplicateKey {
        /// Debug rendering of the colliding key.
        key: String,
    },
}

/// Behavioural tunables for a [`Dock`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DockSettings {
    pub feedback: FeedbackSettings,
    pub gesture: GestureSettings,
}

/// Everything a renderer needs to draw one slot this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemFrame<K, V> {
    pub index: usize,
    pub key: K,
    pub visual: V,
    pub scale: f32,
    /// True for the drag source, which renderers usually ghost.
    pub dragging: bool,
}

/// The visual that follows the pointer during a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackVisual<K, V> {
    pub index: usize,
    pub key: K,
    pub visual: V,
    pub pointer: Option<Point>,
    pub scale: f32,
}

/// Slot under the pointer during a drag, with the acceptance verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverHint {
    pub target: usize,
    pub accepted: bool,
}

type KeyFn<T, K> = Box<dyn Fn(&T) -> K>;
type RenderFn<T, V> = Box<dyn Fn(&T) -> V>;

/// A horizontally reorderable row of items.
pub struct Dock<T, K, V> {
    store: SequenceStore<T>,
    drag: DragState<K>,
    gesture: GestureSettings,
    feedback: FeedbackAnimator<K>,
    drag_events: Observers<DragEvent>,
    key_of: KeyFn<T, K>,
    render: RenderFn<T, V>,
}

impl<T, K, V> Dock<T, K, V>
where
    K: Clone + Ord + Debug,
{
    /// Build a dock over `items`.
    ///
    /// `key_of` must give every item a distinct key; a collision is rejected
    /// with [`DockError::DuplicateKey`].
    pub fn new(
        items: Vec<T>,
        key_of: impl Fn(&T) -> K + 'static,
        render: impl Fn(&T) -> V + 'static,
        settings: DockSettings,
    ) -> Result<Self, DockError> {
        let mut seen = BTreeSet::new();
        for item in &items {
            let key = key_of(item);
            if seen.contains(&key) {
                warn!("Rejecting dock with duplicate key {key:?}");
                return Err(DockError::DuplicateKey {
                    key: format!("{key:?}"),
                });
            }
            seen.insert(key);
        }
        debug!("Dock created with {} items", items.len());
        Ok(Self {
            store: SequenceStore::new(items),
            drag: DragState::Idle,
            gesture: settings.gesture,
            feedback: FeedbackAnimator::new(settings.feedback),
            drag_events: Observers::new(),
            key_of: Box::new(key_of),
            render: Box::new(render),
        })
    }

    /// Items in their current order.
    pub fn items(&self) -> &[T] {
        self.store.current()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Key of the item at `index`.
    pub fn key_at(&self, index: usize) -> Option<K> {
        self.store.get(index).map(|item| (self.key_of)(item))
    }

    /// Drag state machine bound to this dock's store and animator.
    pub fn controller(&mut self) -> DragController<'_, T, K> {
        DragController::new(
            &mut self.drag,
            self.gesture,
            &mut self.store,
            &mut self.feedback,
            &mut self.drag_events,
            &*self.key_of,
        )
    }

    /// Feed one pointer event through the drag state machine.
    pub fn handle(&mut self, event: PointerEvent) -> Result<Option<DropOutcome>, DockError> {
        let outcome = self.controller().handle(event)?;
        if outcome.is_some_and(|outcome| outcome.moved) {
            self.prune_feedback();
        }
        Ok(outcome)
    }

    /// Programmatic reorder, bypassing the drag state machine.
    pub fn move_item(&mut self, old_index: usize, new_index: usize) -> Result<(), DockError> {
        self.store.move_item(old_index, new_index)?;
        self.prune_feedback();
        Ok(())
    }

    /// Advance running animations, then pending presses, by one frame.
    ///
    /// A press that qualifies here starts lifting from rest on the next tick.
    pub fn tick(&mut self, delta: Duration) -> Result<(), DockError> {
        self.feedback.tick_all(delta);
        self.controller().tick(delta)?;
        Ok(())
    }

    /// True while the host should keep scheduling frames.
    pub fn is_animating(&self) -> bool {
        self.feedback.is_animating() || matches!(self.drag, DragState::Pressed(_))
    }

    pub fn drag_state(&self) -> &DragState<K> {
        &self.drag
    }

    /// True when the item at `index` is the drag source.
    pub fn is_dragging(&self, index: usize) -> bool {
        self.key_at(index)
            .is_some_and(|key| self.drag.is_dragging_key(&key))
    }

    /// Current scale of the item at `index`.
    pub fn scale_at(&self, index: usize) -> f32 {
        self.key_at(index)
            .map(|key| self.feedback.scale(&key))
            .unwrap_or(crate::feedback::REST_SCALE)
    }

    /// Hover candidate of the active drag, if any.
    pub fn hover_hint(&self) -> Option<HoverHint> {
        let session = self.drag.session()?;
        let target = session.hover()?;
        Some(HoverHint {
            target,
            accepted: accepts(
                session.current_source(self.store.current(), &*self.key_of),
                target,
            ),
        })
    }

    /// One frame per item, in display order.
    pub fn frame(&self) -> Vec<ItemFrame<K, V>> {
        self.store
            .current()
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let key = (self.key_of)(item);
                ItemFrame {
                    index,
                    scale: self.feedback.scale(&key),
                    dragging: self.drag.is_dragging_key(&key),
                    visual: (self.render)(item),
                    key,
                }
            })
            .collect()
    }

    /// Visual that should follow the pointer, while a drag is active.
    pub fn feedback_visual(&self) -> Option<FeedbackVisual<K, V>> {
        let session = self.drag.session()?;
        let index = self
            .store
            .position(|item| (self.key_of)(item) == *session.key())?;
        let item = self.store.get(index)?;
        Some(FeedbackVisual {
            index,
            key: session.key().clone(),
            visual: (self.render)(item),
            pointer: session.pointer(),
            scale: self.feedback.scale(session.key()),
        })
    }

    /// Subscribe to order changes.
    pub fn subscribe_sequence(
        &mut self,
        callback: impl FnMut(&SequenceEvent) + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(callback)
    }

    /// Subscribe to drag lifecycle changes.
    pub fn subscribe_drag(&mut self, callback: impl FnMut(&DragEvent) + 'static) -> SubscriptionId {
        self.drag_events.subscribe(callback)
    }

    /// Subscribe to per-item scale changes.
    pub fn subscribe_feedback(
        &mut self,
        callback: impl FnMut(&FeedbackEvent<K>) + 'static,
    ) -> SubscriptionId {
        self.feedback.subscribe(callback)
    }

    /// Drop animation records for keys no longer in the sequence.
    fn prune_feedback(&mut self) {
        let keys: BTreeSet<K> = self
            .store
            .current()
            .iter()
            .map(|item| (self.key_of)(item))
            .collect();
        self.feedback.retain(|key| keys.contains(key));
    }
}

impl<T, K, V> fmt::Debug for Dock<T, K, V>
where
    T: Debug,
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dock")
            .field("items", &self.store.current())
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}
