//! Least Recently Used (LRU) replacement policy.
//!
//! Maintains a recency-ordered stack per set, restricted to valid, touched
//! lines. The front is most-recently-used; the back is the next victim.
//!
//! # Performance
//!
//! - `on_touch`: O(W) where W is associativity (removes then re-inserts).
//! - `select_victim_among_valid`: O(1).
//! - Space: O(S × W).

use super::ReplacementPolicy;

/// LRU policy state: one recency stack per set.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// Index 0 is MRU, last index is LRU. Only touched, currently valid
    /// ways appear here — a freshly constructed set's stacks start empty.
    order: Vec<Vec<usize>>,
}

impl LruPolicy {
    /// Creates an LRU policy for `sets` sets of `ways` ways each, with no
    /// ways yet touched.
    pub fn new(sets: usize, ways: usize) -> Self {
        let _ = ways;
        Self {
            order: vec![Vec::new(); sets],
        }
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Moves `way` to the front of `set`'s recency stack, inserting it if
    /// this is its first touch since the last eviction.
    fn on_touch(&mut self, set: usize, way: usize) {
        let stack = &mut self.order[set];
        if let Some(pos) = stack.iter().position(|&w| w == way) {
            stack.remove(pos);
        }
        stack.insert(0, way);
    }

    /// Drops `way` from the recency stack. Harmless if it is already absent
    /// (snoop-invalidation does not call this).
    fn on_evict(&mut self, set: usize, way: usize) {
        let stack = &mut self.order[set];
        if let Some(pos) = stack.iter().position(|&w| w == way) {
            stack.remove(pos);
        }
    }

    /// Returns the way at the back of the recency stack.
    ///
    /// Precondition: every way in `set` has been touched (the engine only
    /// calls this once the invalid-line fast path has been exhausted).
    fn select_victim_among_valid(&mut self, set: usize) -> usize {
        *self.order[set].last().unwrap()
    }
}
