//! Per-cache and aggregate statistics.

use serde::{Deserialize, Serialize};

/// Monotonic per-cache counters, plus their derived rates.
///
/// `hit_rate` and `conflict_rate` are 0.0 when `hits + misses == 0`, never
/// `NaN` from a zero-over-zero division.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Accesses that found their block already resident.
    pub hits: u64,
    /// Accesses that required an install.
    pub misses: u64,
    /// Total `read` calls.
    pub reads: u64,
    /// Total `write` calls.
    pub writes: u64,
    /// Misses that evicted an already-valid line (as opposed to an empty way).
    pub conflicts: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit. `0.0` if there have been no accesses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of accesses that evicted a valid line. `0.0` if there have
    /// been no accesses.
    pub fn conflict_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.conflicts as f64 / total as f64
        }
    }
}

/// Counters and rates summarized across multiple caches.
///
/// `counters` holds each raw counter summed then integer-divided by the
/// cache count, matching how per-cache "average" figures are usually
/// reported. `hit_rate`/`conflict_rate` are instead recomputed from the
/// un-divided sums, so integer truncation of the averaged counters never
/// skews the derived rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Per-counter average (integer division) across all caches.
    pub counters: CacheStats,
    /// Hit rate computed from the summed (not averaged) counters.
    pub hit_rate: f64,
    /// Conflict rate computed from the summed (not averaged) counters.
    pub conflict_rate: f64,
}

/// Aggregates per-cache stats into a single [`AggregateStats`].
///
/// Returns the zero value if `stats` is empty.
pub fn aggregate(stats: &[CacheStats]) -> AggregateStats {
    if stats.is_empty() {
        return AggregateStats::default();
    }
    let n = stats.len() as u64;
    let sum = stats.iter().fold(CacheStats::default(), |mut acc, s| {
        acc.hits += s.hits;
        acc.misses += s.misses;
        acc.reads += s.reads;
        acc.writes += s.writes;
        acc.conflicts += s.conflicts;
        acc
    });
    AggregateStats {
        counters: CacheStats {
            hits: sum.hits / n,
            misses: sum.misses / n,
            reads: sum.reads / n,
            writes: sum.writes / n,
            conflicts: sum.conflicts / n,
        },
        hit_rate: sum.hit_rate(),
        conflict_rate: sum.conflict_rate(),
    }
}
