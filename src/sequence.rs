//! Ordered item storage with an all-or-nothing move operation.

use thiserror::Error;
use tracing::debug;

use crate::observers::{Observers, SubscriptionId};
use crate::reorder::{in_bounds, reorder_in_place};

/// Errors surfaced by [`SequenceStore`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A move referenced an index outside `[0, len)`.
    #[error("Index {index} is out of range for a sequence of {len} items")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Sequence length at the time of the call.
        len: usize,
    },
}

/// Change notification published after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    /// The item at `from` now lives at `to`.
    Moved { from: usize, to: usize },
}

/// Owns the ordered items. The only mutation is [`SequenceStore::move_item`].
#[derive(Debug)]
pub struct SequenceStore<T> {
    items: Vec<T>,
    observers: Observers<SequenceEvent>,
}

impl<T> SequenceStore<T> {
    /// Take ownership of the initial order.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            observers: Observers::new(),
        }
    }

    /// Current order.
    pub fn current(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the sequence holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Index of the first item matching `predicate`.
    pub fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Move the item at `old_index` to `new_index`.
    ///
    /// Equal indices are a no-op and publish nothing. On error the order is
    /// unchanged.
    pub fn move_item(&mut self, old_index: usize, new_index: usize) -> Result<(), SequenceError> {
        let len = self.items.len();
        if !in_bounds(len, old_index, new_index) {
            let index = if old_index >= len { old_index } else { new_index };
            return Err(SequenceError::IndexOutOfRange { index, len });
        }
        if old_index == new_index {
            debug!("move_item: {old_index} -> {new_index} is a no-op");
            return Ok(());
        }
        reorder_in_place(&mut self.items, old_index, new_index);
        debug!("move_item: {old_index} -> {new_index}");
        self.observers.publish(&SequenceEvent::Moved {
            from: old_index,
            to: new_index,
        });
        Ok(())
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&mut self, callback: impl FnMut(&SequenceEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Drop a subscription created by [`SequenceStore::subscribe`].
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
