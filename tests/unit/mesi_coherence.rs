//! Multi-cache MESI Coherence Tests.
//!
//! Verifies that two caches sharing a bus transition between Modified,
//! Exclusive, Shared, and Invalid correctly on each other's reads and
//! writes, with no access latency or data modelling involved.
//!
//! The cache is constructed directly from `CacheConfig` — no driver glue
//! needed to exercise coherence.

use std::cell::RefCell;
use std::rc::Rc;

use cachesim_core::bus::Bus;
use cachesim_core::cache::Cache;
use cachesim_core::config::{CacheConfig, ReplacementPolicyKind};
use cachesim_core::mesi::{BusEvent, MesiState};
use pretty_assertions::assert_eq;

fn two_caches() -> (Rc<RefCell<Bus>>, Rc<RefCell<Cache>>, Rc<RefCell<Cache>>) {
    let config = CacheConfig::new(1024, 16, 4, ReplacementPolicyKind::Lru).unwrap();
    let bus = Rc::new(RefCell::new(Bus::new()));
    let c1 = Rc::new(RefCell::new(Cache::new(config, 0, Some(Rc::clone(&bus)))));
    let c2 = Rc::new(RefCell::new(Cache::new(config, 1, Some(Rc::clone(&bus)))));
    bus.borrow_mut().attach(0, &c1);
    bus.borrow_mut().attach(1, &c2);
    (bus, c1, c2)
}

// ══════════════════════════════════════════════════════════
// S6: read / read / write / read
// ══════════════════════════════════════════════════════════

#[test]
fn s6_mesi_coherence_across_two_caches() {
    let (_bus, c1, c2) = two_caches();
    let addr = 0x1000;

    c1.borrow_mut().read(addr);
    let (_, _, state1) = c1.borrow().find_line(addr).unwrap();
    assert_eq!(state1, MesiState::Exclusive);

    c2.borrow_mut().read(addr);
    let (_, _, state2) = c2.borrow().find_line(addr).unwrap();
    let (_, _, state1) = c1.borrow().find_line(addr).unwrap();
    assert_eq!(state2, MesiState::Shared);
    assert_eq!(state1, MesiState::Shared);

    c1.borrow_mut().write(addr, 0xFF);
    let (_, _, state1) = c1.borrow().find_line(addr).unwrap();
    assert_eq!(state1, MesiState::Modified);
    assert!(c2.borrow().find_line(addr).is_none()); // invalidated

    c2.borrow_mut().read(addr);
    let (_, _, state2) = c2.borrow().find_line(addr).unwrap();
    let (_, _, state1) = c1.borrow().find_line(addr).unwrap();
    assert_eq!(state2, MesiState::Shared);
    assert_eq!(state1, MesiState::Shared);
}

// ══════════════════════════════════════════════════════════
// Mutual exclusion invariants
// ══════════════════════════════════════════════════════════

#[test]
fn modified_in_one_cache_excludes_valid_in_any_peer() {
    let (_bus, c1, c2) = two_caches();
    let addr = 0x2000;
    c1.borrow_mut().write(addr, 0x01);
    assert_eq!(c1.borrow().find_line(addr).unwrap().2, MesiState::Modified);
    assert!(c2.borrow().find_line(addr).is_none());
}

#[test]
fn exclusive_excludes_valid_in_any_peer() {
    let (_bus, c1, c2) = two_caches();
    let addr = 0x3000;
    c1.borrow_mut().read(addr);
    assert_eq!(c1.borrow().find_line(addr).unwrap().2, MesiState::Exclusive);
    assert!(c2.borrow().find_line(addr).is_none());
}

#[test]
fn isolated_cache_write_then_read_is_modified() {
    let config = CacheConfig::new(1024, 16, 4, ReplacementPolicyKind::Lru).unwrap();
    let mut cache = Cache::new(config, 0, None);
    assert!(!cache.write(0x4000, 0xAB));
    assert!(cache.read(0x4000));
    assert_eq!(cache.find_line(0x4000).unwrap().2, MesiState::Modified);
}

#[test]
fn snoop_busrdx_idempotence_law() {
    let (_bus, c1, c2) = two_caches();
    let addr = 0x5000;
    c1.borrow_mut().read(addr);
    // Directly drive the peer's snoop, as the bus would on a write-miss elsewhere.
    assert!(!c2.borrow_mut().snoop(addr, BusEvent::BusRdX)); // c2 never held it
    assert!(c1.borrow_mut().snoop(addr, BusEvent::BusRdX));
    assert!(!c1.borrow_mut().snoop(addr, BusEvent::BusRdX));
}
