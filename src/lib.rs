//! Multi-core cache coherence simulator.
//!
//! Models, per core, a single-level set-associative cache with configurable
//! size, block size, and associativity, a pluggable replacement policy
//! (LRU or LFU), and a shared snoop bus enforcing MESI coherence across
//! caches. This crate is the engine only: address decomposition, set/way
//! lookup, replacement bookkeeping, the per-line MESI state machine, and
//! the bus. A trace generator, CLI, or report formatter is expected to sit
//! on top as an external driver.
//!
//! # Example
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use cachesim_core::bus::Bus;
//! use cachesim_core::cache::Cache;
//! use cachesim_core::config::{CacheConfig, ReplacementPolicyKind};
//!
//! let config = CacheConfig::new(1024, 16, 4, ReplacementPolicyKind::Lru)?;
//! let bus = Rc::new(RefCell::new(Bus::new()));
//! let cache0 = Rc::new(RefCell::new(Cache::new(config, 0, Some(Rc::clone(&bus)))));
//! bus.borrow_mut().attach(0, &cache0);
//!
//! cache0.borrow_mut().read(0x1000);
//! println!("{:?}", cache0.borrow().stats());
//! ```

/// Shared snoop bus coordinating peer caches.
pub mod bus;
/// The cache engine: read/write/snoop and MESI state transitions.
pub mod cache;
/// Validated cache geometry and replacement policy selection.
pub mod config;
/// Pure address-to-(tag, set, offset) decomposition.
pub mod decoder;
/// Configuration validation errors.
pub mod error;
/// Cache line and set storage.
pub mod line;
/// MESI coherence states and bus events.
pub mod mesi;
/// Pluggable block-replacement policies (LRU, LFU).
pub mod policy;
/// Per-cache and aggregate statistics.
pub mod stats;

pub use crate::bus::Bus;
pub use crate::cache::Cache;
pub use crate::config::{CacheConfig, ReplacementPolicyKind};
pub use crate::error::ConfigError;
pub use crate::mesi::{BusEvent, MesiState};
pub use crate::stats::{AggregateStats, CacheStats};
