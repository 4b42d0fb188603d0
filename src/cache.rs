//! The cache engine: address lookup, MESI transitions, and the replacement
//! policy's interaction with the snoop bus.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::bus::Bus;
use crate::config::CacheConfig;
use crate::decoder::decode;
use crate::line::CacheSet;
use crate::mesi::{BusEvent, MesiState};
use crate::policy::{Policy, ReplacementPolicy};
use crate::stats::CacheStats;

/// One core's private cache: sets of lines, a replacement policy index,
/// and an optional link to the shared snoop bus.
#[derive(Debug)]
pub struct Cache {
    config: CacheConfig,
    core_id: u32,
    bus: Option<Rc<RefCell<Bus>>>,
    sets: Vec<CacheSet>,
    policy: Policy,
    stats: CacheStats,
}

impl Cache {
    /// Builds a cache from an already-validated `config`. Infallible:
    /// validity is established by [`CacheConfig::new`] before this is ever
    /// called.
    pub fn new(config: CacheConfig, core_id: u32, bus: Option<Rc<RefCell<Bus>>>) -> Self {
        let sets = (0..config.num_sets)
            .map(|_| CacheSet::new(config.associativity))
            .collect();
        let policy = Policy::new(config.policy, config.num_sets, config.associativity);
        Self {
            config,
            core_id,
            bus,
            sets,
            policy,
            stats: CacheStats::default(),
        }
    }

    /// This cache's id, as given to [`Cache::new`] and to `Bus::attach`.
    pub fn core_id(&self) -> u32 {
        self.core_id
    }

    /// A copy of the configuration this cache was built from.
    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// A read-only snapshot of this cache's counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Looks up `address`'s line, for assertions and tests. Returns
    /// `(set_index, way_index, state)` if the block is valid and resident.
    pub fn find_line(&self, address: u64) -> Option<(usize, usize, MesiState)> {
        let decoded = decode(address, self.config.block_size, self.config.num_sets);
        let way = self.sets[decoded.set_index].find(decoded.tag)?;
        Some((decoded.set_index, way, self.sets[decoded.set_index].lines[way].state))
    }

    /// Picks the way to install a new block into: any invalid way first
    /// (no conflict charged), else the policy's preferred victim among
    /// valid ways (conflict charged). The victim's `on_evict` is invoked
    /// before the caller overwrites its tag.
    fn choose_victim(&mut self, set_index: usize) -> usize {
        if let Some(way) = self.sets[set_index]
            .lines
            .iter()
            .position(|line| !line.valid)
        {
            // A peer's BusRdX may have invalidated this way without calling
            // on_evict (the policy index is deliberately left stale on
            // snoop-invalidate). Clean it up now so a policy with per-line
            // state keyed by identity, not just validity, starts fresh.
            self.policy.on_evict(set_index, way);
            return way;
        }
        self.stats.conflicts += 1;
        let way = self.policy.select_victim_among_valid(set_index);
        self.policy.on_evict(set_index, way);
        self.sets[set_index].lines[way].reset();
        way
    }

    /// Reads `address`. Returns `true` on a hit.
    pub fn read(&mut self, address: u64) -> bool {
        self.stats.reads += 1;
        let decoded = decode(address, self.config.block_size, self.config.num_sets);

        if let Some(way) = self.sets[decoded.set_index].find(decoded.tag) {
            self.stats.hits += 1;
            self.policy.on_touch(decoded.set_index, way);
            trace!(core = self.core_id, address, "read hit");
            return true;
        }

        self.stats.misses += 1;
        let way = self.choose_victim(decoded.set_index);

        let shared = match &self.bus {
            Some(bus) => bus.borrow().broadcast(self.core_id, address, BusEvent::BusRd),
            None => false,
        };

        let line = &mut self.sets[decoded.set_index].lines[way];
        line.valid = true;
        line.tag = decoded.tag;
        line.dirty = false;
        line.state = if shared {
            MesiState::Shared
        } else {
            MesiState::Exclusive
        };
        self.policy.on_touch(decoded.set_index, way);
        debug!(core = self.core_id, address, shared, "read miss, installed");
        false
    }

    /// Writes `value` to `address`. `value` is accepted for API parity but
    /// never stored — this simulator does not model data contents. Returns
    /// `true` on a hit.
    pub fn write(&mut self, address: u64, value: u8) -> bool {
        let _ = value;
        self.stats.writes += 1;
        let decoded = decode(address, self.config.block_size, self.config.num_sets);

        if let Some(way) = self.sets[decoded.set_index].find(decoded.tag) {
            self.stats.hits += 1;
            self.policy.on_touch(decoded.set_index, way);

            let state = self.sets[decoded.set_index].lines[way].state;
            match state {
                MesiState::Shared => {
                    if let Some(bus) = &self.bus {
                        bus.borrow().broadcast(self.core_id, address, BusEvent::BusRdX);
                    }
                    self.sets[decoded.set_index].lines[way].state = MesiState::Modified;
                }
                MesiState::Exclusive => {
                    self.sets[decoded.set_index].lines[way].state = MesiState::Modified;
                }
                MesiState::Modified => {}
                MesiState::Invalid => unreachable!("a found line is always valid"),
            }
            self.sets[decoded.set_index].lines[way].dirty = true;
            trace!(core = self.core_id, address, "write hit");
            return true;
        }

        self.stats.misses += 1;
        let way = self.choose_victim(decoded.set_index);

        if let Some(bus) = &self.bus {
            bus.borrow().broadcast(self.core_id, address, BusEvent::BusRdX);
        }

        let line = &mut self.sets[decoded.set_index].lines[way];
        line.valid = true;
        line.tag = decoded.tag;
        line.dirty = true;
        line.state = MesiState::Modified;
        self.policy.on_touch(decoded.set_index, way);
        debug!(core = self.core_id, address, "write miss, installed");
        false
    }

    /// Reacts to a bus event issued by a peer cache. Never called on the
    /// issuing cache itself. Returns whether the block was present (and
    /// thus valid) before the event.
    ///
    /// The replacement policy index is deliberately left untouched here:
    /// on `BusRdX` the line is invalidated but its stale index entry is
    /// harmless, because `choose_victim`'s invalid-first scan will pick it
    /// up directly the next time this set needs a victim.
    pub fn snoop(&mut self, address: u64, event: BusEvent) -> bool {
        let decoded = decode(address, self.config.block_size, self.config.num_sets);
        let Some(way) = self.sets[decoded.set_index].find(decoded.tag) else {
            return false;
        };
        let line = &mut self.sets[decoded.set_index].lines[way];
        match event {
            BusEvent::BusRd => match line.state {
                MesiState::Modified => {
                    line.dirty = false;
                    line.state = MesiState::Shared;
                }
                MesiState::Exclusive => {
                    line.state = MesiState::Shared;
                }
                MesiState::Shared | MesiState::Invalid => {}
            },
            BusEvent::BusRdX => {
                line.valid = false;
                line.state = MesiState::Invalid;
                line.dirty = false;
            }
        }
        trace!(core = self.core_id, address, ?event, "snoop");
        true
    }
}
