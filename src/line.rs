//! Cache line and set storage.

use crate::mesi::MesiState;

/// One slot within a [`CacheSet`].
///
/// Identity is positional: `(set_index, way_index)`, never a pointer.
/// `data` is intentionally not modelled (see the crate-level docs) — only
/// metadata needed for coherence and replacement bookkeeping is kept.
#[derive(Debug, Clone, Copy)]
pub struct CacheLine {
    /// Whether this line holds a live block. Always `state != Invalid`.
    pub valid: bool,
    /// Whether the line has been written since its last fill. Implies `state == Modified`.
    pub dirty: bool,
    /// Tag of the resident block; meaningless when `!valid`.
    pub tag: u64,
    /// Coherence state.
    pub state: MesiState,
}

impl Default for CacheLine {
    fn default() -> Self {
        Self {
            valid: false,
            dirty: false,
            tag: 0,
            state: MesiState::Invalid,
        }
    }
}

impl CacheLine {
    /// Resets a line back to its cold, invalid state, ready to be reused by
    /// a future install. Called by the cache engine immediately after
    /// `on_evict` runs against the old identity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A fixed-size, index-stable collection of lines sharing a set index.
///
/// `lines.len() == associativity` for the cache's entire lifetime; no
/// element is ever added or removed, only mutated in place.
#[derive(Debug, Clone)]
pub struct CacheSet {
    /// The set's ways, indexed 0..associativity.
    pub lines: Vec<CacheLine>,
}

impl CacheSet {
    /// Creates a set with `associativity` fresh, invalid lines.
    pub fn new(associativity: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); associativity],
        }
    }

    /// Finds the way holding `tag` among currently valid lines, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }
}
