//! Recycled per-search bookkeeping.
//!
//! A [`StatePool`] hands out [`SearchState`] records by slot index. Between
//! two [`StatePool::reset`] calls every slot is issued at most once. After
//! a reset the same records are overwritten in place, so the backing
//! vector only grows when a search touches more nodes than any earlier one.

use crate::heap::HeapEntry;

/// Bookkeeping for one node touched by a search.
#[derive(Debug, Clone)]
pub struct SearchState<I> {
    pub(crate) node: I,
    pub(crate) parent: Option<usize>,
    pub(crate) distance_to_source: f64,
    pub(crate) f_score: f64,
    pub(crate) open: bool,
    pub(crate) closed: bool,
    pub(crate) heap_index: Option<usize>,
}

impl<I: Copy> SearchState<I> {
    fn fresh(node: I) -> Self {
        Self {
            node,
            parent: None,
            distance_to_source: f64::INFINITY,
            f_score: f64::INFINITY,
            open: false,
            closed: false,
            heap_index: None,
        }
    }

    /// Id of the node this state tracks.
    #[inline]
    pub fn node(&self) -> I {
        self.node
    }

    /// Pool slot of the predecessor on the best known path, `None` for the
    /// start state and for states not reached yet.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Best known cumulative cost from the start (g-score).
    #[inline]
    pub fn distance_to_source(&self) -> f64 {
        self.distance_to_source
    }

    /// g-score plus heuristic estimate; the queue priority.
    #[inline]
    pub fn f_score(&self) -> f64 {
        self.f_score
    }

    /// Estimated remaining cost to the goal (`f_score - distance_to_source`).
    #[inline]
    pub fn remaining_estimate(&self) -> f64 {
        self.f_score - self.distance_to_source
    }

    /// Whether the state has been queued in this search.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the state has been popped and expanded.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current position in the open queue, `None` when not queued.
    #[inline]
    pub fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }
}

impl<I> HeapEntry for SearchState<I> {
    #[inline]
    fn key(&self) -> f64 {
        self.f_score
    }

    #[inline]
    fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }

    #[inline]
    fn set_heap_index(&mut self, index: Option<usize>) {
        self.heap_index = index;
    }
}

/// Growable arena of [`SearchState`]s with a resettable cursor.
#[derive(Debug, Clone)]
pub struct StatePool<I> {
    states: Vec<SearchState<I>>,
    cursor: usize,
}

impl<I> Default for StatePool<I> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            cursor: 0,
        }
    }
}

impl<I: Copy> StatePool<I> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool with room for `capacity` records before it grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Mark every issued state reclaimable. O(1): nothing is freed or
    /// reordered.
    #[inline]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Issue the next state, initialized for `node`, and return its slot.
    ///
    /// The pool does not know which nodes it has already issued states for;
    /// asking twice for the same node yields two distinct slots.
    pub fn create_new_state(&mut self, node: I) -> usize {
        let slot = self.cursor;
        match self.states.get_mut(slot) {
            Some(state) => *state = SearchState::fresh(node),
            None => self.states.push(SearchState::fresh(node)),
        }
        self.cursor += 1;
        slot
    }

    /// The state at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` was not issued since the last reset.
    #[inline]
    pub fn get(&self, slot: usize) -> &SearchState<I> {
        &self.issued()[slot]
    }

    /// Mutable access to the state at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` was not issued since the last reset.
    #[inline]
    pub fn get_mut(&mut self, slot: usize) -> &mut SearchState<I> {
        &mut self.issued_mut()[slot]
    }

    /// States issued since the last reset, indexed by slot.
    #[inline]
    pub fn issued(&self) -> &[SearchState<I>] {
        &self.states[..self.cursor]
    }

    /// Mutable view of the issued states; this is the arena the open queue
    /// works on.
    #[inline]
    pub fn issued_mut(&mut self) -> &mut [SearchState<I>] {
        &mut self.states[..self.cursor]
    }

    /// Number of states issued since the last reset.
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Whether nothing was issued since the last reset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Number of records ever allocated (the high-water mark).
    #[inline]
    pub fn allocated(&self) -> usize {
        self.states.len()
    }
}
