//! Binary min-heap with intrusive position tracking.
//!
//! The heap stores arena slots, not entries. Every entry records its own
//! position in the heap ([`HeapEntry::heap_index`]), which is what lets
//! [`IndexedHeap::update_item`] reorder an entry after its key changed
//! without any auxiliary slot-to-position map. Every operation that moves
//! a slot writes the new position back into the entry before returning.
//!
//! Entries are ordered by ascending [`HeapEntry::key`]. Equal keys have no
//! secondary ordering: which of them pops first depends on sift order and
//! is not FIFO.

/// An arena entry that can be queued in an [`IndexedHeap`].
pub trait HeapEntry {
    /// Priority key. Smaller pops first. Must not be NaN.
    fn key(&self) -> f64;
    /// Current position in the heap, `None` when not queued.
    fn heap_index(&self) -> Option<usize>;
    /// Record the entry's position in the heap.
    fn set_heap_index(&mut self, index: Option<usize>);
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left_child(i: usize) -> usize {
    2 * i + 1
}

/// Min-heap of arena slots keyed by the entries they point at.
///
/// All operations take the arena (`entries`) explicitly. The caller must
/// always pass the same arena for a given heap.
#[derive(Debug, Default, Clone)]
pub struct IndexedHeap {
    slots: Vec<usize>,
}

impl IndexedHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty heap with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Build a heap from pre-populated slots in O(n).
    ///
    /// Every entry gets its heap index assigned here, not only entries
    /// that later move.
    pub fn from_slots<E: HeapEntry>(entries: &mut [E], slots: Vec<usize>) -> Self {
        let mut heap = Self { slots };
        for (i, &slot) in heap.slots.iter().enumerate() {
            entries[slot].set_heap_index(Some(i));
        }
        for i in (0..heap.slots.len() / 2).rev() {
            heap.sift_down(entries, i);
        }
        heap
    }

    /// Number of queued slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every queued slot, keeping capacity.
    ///
    /// Entries are not touched, so their recorded heap indices go stale.
    /// Callers reinitialize entries before queueing them again.
    #[inline]
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// The backing array: `as_slice()[i]` is the slot at heap position `i`.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.slots
    }

    /// The slot with the smallest key, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<usize> {
        self.slots.first().copied()
    }

    /// Queue `slot`. O(log n).
    pub fn push<E: HeapEntry>(&mut self, entries: &mut [E], slot: usize) {
        debug_assert!(
            entries[slot].heap_index().is_none(),
            "slot {slot} is already queued"
        );
        let pos = self.slots.len();
        self.slots.push(slot);
        entries[slot].set_heap_index(Some(pos));
        self.sift_up(entries, pos);
    }

    /// Remove and return the slot with the smallest key. O(log n).
    ///
    /// The returned entry's heap index is reset to `None`.
    pub fn pop<E: HeapEntry>(&mut self, entries: &mut [E]) -> Option<usize> {
        let last = self.slots.pop()?;
        let top = if self.slots.is_empty() {
            last
        } else {
            let top = std::mem::replace(&mut self.slots[0], last);
            entries[last].set_heap_index(Some(0));
            self.sift_down(entries, 0);
            top
        };
        entries[top].set_heap_index(None);
        Some(top)
    }

    /// Restore heap order after the key of the entry at heap position
    /// `index` changed. O(log n).
    ///
    /// Must be called right after the key is mutated, before any other
    /// heap operation. The entry is sifted up and then down; at most one
    /// of the two actually moves it.
    pub fn update_item<E: HeapEntry>(&mut self, entries: &mut [E], index: usize) {
        debug_assert!(index < self.slots.len(), "heap position {index} out of bounds");
        let pos = self.sift_up(entries, index);
        self.sift_down(entries, pos);
    }

    /// Move the slot at `pos` toward the root. Returns its final position.
    fn sift_up<E: HeapEntry>(&mut self, entries: &mut [E], mut pos: usize) -> usize {
        let slot = self.slots[pos];
        let key = entries[slot].key();
        debug_assert!(!key.is_nan(), "heap keys must not be NaN");
        while pos > 0 {
            let up = parent(pos);
            let up_slot = self.slots[up];
            if entries[up_slot].key() <= key {
                break;
            }
            self.slots[pos] = up_slot;
            entries[up_slot].set_heap_index(Some(pos));
            pos = up;
        }
        self.slots[pos] = slot;
        entries[slot].set_heap_index(Some(pos));
        pos
    }

    /// Move the slot at `pos` toward the leaves. Returns its final position.
    fn sift_down<E: HeapEntry>(&mut self, entries: &mut [E], mut pos: usize) -> usize {
        let len = self.slots.len();
        let slot = self.slots[pos];
        let key = entries[slot].key();
        debug_assert!(!key.is_nan(), "heap keys must not be NaN");
        loop {
            let mut child = left_child(pos);
            if child >= len {
                break;
            }
            let right = child + 1;
            if right < len && entries[self.slots[right]].key() < entries[self.slots[child]].key()
            {
                child = right;
            }
            let child_slot = self.slots[child];
            if entries[child_slot].key() >= key {
                break;
            }
            self.slots[pos] = child_slot;
            entries[child_slot].set_heap_index(Some(pos));
            pos = child;
        }
        self.slots[pos] = slot;
        entries[slot].set_heap_index(Some(pos));
        pos
    }
}
