//! Pure reordering math for moving one element within a sequence.
//!
//! `source` and `dest` are both positions in the sequence; `dest` is read in the
//! post-removal index space, so every element strictly between the two shifts
//! by one slot toward `source`. Bounds are the caller's responsibility.

/// Return a copy of `items` with the element at `source` moved to `dest`.
///
/// The input is left untouched. All other elements keep their relative order.
pub fn reorder<T: Clone>(items: &[T], source: usize, dest: usize) -> Vec<T> {
    let mut next = items.to_vec();
    reorder_in_place(&mut next, source, dest);
    next
}

/// Move the element at `source` to `dest` inside `items`.
///
/// Implemented as a slice rotation, so no element is cloned or dropped.
pub fn reorder_in_place<T>(items: &mut [T], source: usize, dest: usize) {
    debug_assert!(source < items.len() && dest < items.len());
    if source < dest {
        items[source..=dest].rotate_left(1);
    } else if dest < source {
        items[dest..=source].rotate_right(1);
    }
}

/// True when `(source, dest)` is a valid pair for a sequence of `len` items.
pub fn in_bounds(len: usize, source: usize, dest: usize) -> bool {
    source < len && dest < len
}
