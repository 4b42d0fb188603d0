//! Snoop Bus Broadcast Tests.
//!
//! Verifies attach-order iteration, sender skipping, and the
//! disjunction-of-peer-results contract with three or more peers.

use std::cell::RefCell;
use std::rc::Rc;

use cachesim_core::bus::Bus;
use cachesim_core::cache::Cache;
use cachesim_core::config::{CacheConfig, ReplacementPolicyKind};
use cachesim_core::mesi::BusEvent;

fn attach(bus: &Rc<RefCell<Bus>>, id: u32) -> Rc<RefCell<Cache>> {
    let config = CacheConfig::new(1024, 16, 4, ReplacementPolicyKind::Lru).unwrap();
    let cache = Rc::new(RefCell::new(Cache::new(config, id, Some(Rc::clone(bus)))));
    bus.borrow_mut().attach(id, &cache);
    cache
}

// ══════════════════════════════════════════════════════════
// Disjunction semantics
// ══════════════════════════════════════════════════════════

#[test]
fn broadcast_is_false_when_no_peer_holds_the_block() {
    let bus = Rc::new(RefCell::new(Bus::new()));
    let c0 = attach(&bus, 0);
    let _c1 = attach(&bus, 1);
    let _c2 = attach(&bus, 2);

    // read on c0 triggers a BusRd broadcast; neither peer has the block.
    assert!(!c0.borrow_mut().read(0x1000));
}

#[test]
fn broadcast_is_true_when_any_single_peer_holds_the_block() {
    let bus = Rc::new(RefCell::new(Bus::new()));
    let c0 = attach(&bus, 0);
    let c1 = attach(&bus, 1);
    let c2 = attach(&bus, 2);

    c1.borrow_mut().read(0x1000);
    let shared = bus.borrow().broadcast(0, 0x1000, BusEvent::BusRd);
    assert!(shared);
    let _ = &c0;
    let _ = &c2;
}

// ══════════════════════════════════════════════════════════
// Sender exclusion and attach order
// ══════════════════════════════════════════════════════════

#[test]
fn broadcast_never_snoops_the_sender() {
    let bus = Rc::new(RefCell::new(Bus::new()));
    let c0 = attach(&bus, 0);

    c0.borrow_mut().read(0x1000);
    // c0 is the only peer and is always the sender; nothing to snoop.
    // If broadcast tried to re-borrow the sender this would panic on the
    // already-held RefCell borrow instead of returning cleanly.
    let shared = bus.borrow().broadcast(0, 0x1000, BusEvent::BusRd);
    assert!(!shared);
}

#[test]
fn three_peers_all_observe_a_busrdx_invalidate() {
    let bus = Rc::new(RefCell::new(Bus::new()));
    let c0 = attach(&bus, 0);
    let c1 = attach(&bus, 1);
    let c2 = attach(&bus, 2);
    let c3 = attach(&bus, 3);

    c1.borrow_mut().read(0x2000);
    c2.borrow_mut().read(0x2000);
    c3.borrow_mut().read(0x2000);

    // c0 writes, invalidating everyone else via BusRdX.
    c0.borrow_mut().write(0x2000, 0x42);

    assert!(c1.borrow().find_line(0x2000).is_none());
    assert!(c2.borrow().find_line(0x2000).is_none());
    assert!(c3.borrow().find_line(0x2000).is_none());
}
