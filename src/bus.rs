//! Snoop bus: broadcasts coherence events between caches.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::cache::Cache;
use crate::mesi::BusEvent;

/// Pure dispatcher between attached caches.
///
/// Holds no mutable state of its own across calls — it only fans a
/// broadcast out to peers in attach order and folds their responses. Caches
/// are held weakly: the bus observes cache lifetime, it does not own it.
#[derive(Debug, Default)]
pub struct Bus {
    peers: Vec<(u32, Weak<RefCell<Cache>>)>,
}

impl Bus {
    /// Creates a bus with no attached caches.
    pub fn new() -> Self {
        Self { peers: Vec::new() }
    }

    /// Registers `cache` as a peer identified by `core_id`. Attach order is
    /// the order peers are visited during a broadcast.
    ///
    /// The id is recorded alongside the weak handle (rather than read from
    /// the cache itself during broadcast) so the sender can be skipped
    /// without ever borrowing its own, currently-held `RefCell`.
    pub fn attach(&mut self, core_id: u32, cache: &Rc<RefCell<Cache>>) {
        self.peers.push((core_id, Rc::downgrade(cache)));
    }

    /// Broadcasts `event` for `address` to every attached cache except
    /// `sender_id`, in attach order, and returns the disjunction of their
    /// `snoop` results.
    ///
    /// A peer whose `Weak` handle has expired is silently skipped — it can
    /// only mean the driver dropped a cache it no longer owns.
    pub fn broadcast(&self, sender_id: u32, address: u64, event: BusEvent) -> bool {
        let mut shared = false;
        for (core_id, peer) in &self.peers {
            if *core_id == sender_id {
                continue;
            }
            let Some(peer) = peer.upgrade() else {
                continue;
            };
            let hit = peer.borrow_mut().snoop(address, event);
            trace!(sender_id, address, ?event, hit, "bus broadcast to peer");
            shared |= hit;
        }
        shared
    }
}
