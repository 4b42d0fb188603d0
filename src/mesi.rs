//! MESI coherence states and bus events.

/// Per-line coherence state.
///
/// Invariants enforced by [`crate::cache::Cache`]: `Modified` implies no
/// peer cache holds a valid copy of the block; `Exclusive` implies the same
/// plus `!dirty`; `Shared` implies `!dirty`. `Invalid` is the reset state
/// and the only state in which `valid` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MesiState {
    /// Data differs from main memory; no peer holds a valid copy.
    Modified,
    /// Data matches main memory; no peer holds a valid copy.
    Exclusive,
    /// Data matches main memory; peers may hold a valid copy.
    Shared,
    /// The line holds no meaningful data.
    #[default]
    Invalid,
}

/// Events broadcast over the snoop bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// A peer issued a read miss or a read upgrade.
    BusRd,
    /// A peer issued a write miss or a write upgrade (invalidates peers).
    BusRdX,
}
