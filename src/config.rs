//! Cache configuration.
//!
//! [`CacheConfig`] is the only way to describe a cache's geometry. Its
//! constructor performs all validation required by the replacement-policy
//! and address-decode invariants up front, so every other module in this
//! crate can assume a `CacheConfig` it holds is valid.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Cache replacement policy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicyKind {
    /// Least Recently Used.
    Lru,
    /// Least Frequently Used, LRU-within-frequency tie-break.
    Lfu,
}

/// Validated geometry and policy selection for one cache.
///
/// `cache_size`, `block_size`, and `associativity` are all positive;
/// `block_size` and the derived `num_sets` are powers of two; `cache_size`
/// is evenly divisible by `block_size * associativity`. These invariants
/// are enforced once, in [`CacheConfig::new`]; there is no other way to
/// construct a `CacheConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    /// Total cache capacity in bytes.
    pub cache_size: usize,
    /// Block (cache line) size in bytes. Must be a power of two.
    pub block_size: usize,
    /// Number of ways per set.
    pub associativity: usize,
    /// Number of sets, derived as `cache_size / (block_size * associativity)`.
    pub num_sets: usize,
    /// Replacement policy used on conflict misses.
    pub policy: ReplacementPolicyKind,
}

impl CacheConfig {
    /// Validates and constructs a cache configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any dimension is zero, `block_size` is not
    /// a power of two, `cache_size` is not divisible by
    /// `block_size * associativity`, or the derived set count is not a
    /// power of two.
    pub fn new(
        cache_size: usize,
        block_size: usize,
        associativity: usize,
        policy: ReplacementPolicyKind,
    ) -> Result<Self, ConfigError> {
        if cache_size == 0 || block_size == 0 || associativity == 0 {
            return Err(ConfigError::NonPositiveDimension {
                cache_size,
                block_size,
                associativity,
            });
        }
        if !block_size.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(block_size));
        }
        let set_bytes = block_size * associativity;
        if cache_size % set_bytes != 0 {
            return Err(ConfigError::SizeNotDivisible {
                cache_size,
                block_size,
                associativity,
            });
        }
        let num_sets = cache_size / set_bytes;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo(num_sets));
        }
        Ok(Self {
            cache_size,
            block_size,
            associativity,
            num_sets,
            policy,
        })
    }
}

impl<'de> Deserialize<'de> for CacheConfig {
    /// Deserializes and validates in one step, routing through [`CacheConfig::new`]
    /// so a config loaded from JSON/TOML cannot skip the invariant checks.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            cache_size: usize,
            block_size: usize,
            associativity: usize,
            policy: ReplacementPolicyKind,
        }
        let raw = Raw::deserialize(deserializer)?;
        CacheConfig::new(raw.cache_size, raw.block_size, raw.associativity, raw.policy)
            .map_err(serde::de::Error::custom)
    }
}
