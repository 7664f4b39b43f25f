//! Keyed min-priority queue used as the search frontier

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap slot. Ordering looks only at the key and insertion sequence,
/// never at the item itself.
struct Slot<K, T> {
    key: K,
    seq: u64,
    item: T,
}

impl<K: Ord, T> PartialEq for Slot<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<K: Ord, T> Eq for Slot<K, T> {}

impl<K: Ord, T> PartialOrd for Slot<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T> Ord for Slot<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is a max-heap);
        // among equal keys the earlier insertion wins
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-priority queue ordered by a caller-supplied key function.
///
/// Items with equal keys come out in insertion order. Duplicate items are
/// allowed; the queue has no notion of item identity.
pub struct Frontier<T, K, F>
where
    F: Fn(&T) -> K,
{
    heap: BinaryHeap<Slot<K, T>>,
    key_fn: F,
    next_seq: u64,
}

impl<T, K, F> Frontier<T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    pub fn new(key_fn: F) -> Self {
        Self {
            heap: BinaryHeap::new(),
            key_fn,
            next_seq: 0,
        }
    }

    /// Insert an item, keyed by `key_fn(&item)` at insertion time.
    pub fn push(&mut self, item: T) {
        let key = (self.key_fn)(&item);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Slot { key, seq, item });
    }

    /// Remove and return the item with the lowest key.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|slot| slot.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
