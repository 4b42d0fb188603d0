//! Configuration validation errors.

use thiserror::Error;

/// Errors produced when constructing a [`crate::config::CacheConfig`].
///
/// All variants are detected eagerly in [`crate::config::CacheConfig::new`];
/// there is no way to obtain a `CacheConfig` that violates these invariants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `cache_size`, `block_size`, or `associativity` was zero.
    #[error("cache dimensions must be non-zero (size={cache_size}, block={block_size}, ways={associativity})")]
    NonPositiveDimension {
        /// Requested total cache size in bytes.
        cache_size: usize,
        /// Requested block size in bytes.
        block_size: usize,
        /// Requested associativity.
        associativity: usize,
    },

    /// `block_size` is not a power of two.
    #[error("block_size {0} is not a power of two")]
    BlockSizeNotPowerOfTwo(usize),

    /// `cache_size` is not evenly divisible by `block_size * associativity`.
    #[error(
        "cache_size {cache_size} is not divisible by block_size * associativity ({block_size} * {associativity})"
    )]
    SizeNotDivisible {
        /// Requested total cache size in bytes.
        cache_size: usize,
        /// Requested block size in bytes.
        block_size: usize,
        /// Requested associativity.
        associativity: usize,
    },

    /// The derived number of sets (`cache_size / (block_size * associativity)`)
    /// is not a power of two, which the address decoder requires.
    #[error("derived set count {0} is not a power of two")]
    SetCountNotPowerOfTwo(usize),
}
