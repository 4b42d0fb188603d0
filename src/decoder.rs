//! Address decomposition into (tag, set_index, offset).

/// The three components a 64-bit address decomposes into for a cache with
/// block size `B = 2^b` and `S = 2^s` sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAddress {
    /// High-order bits identifying which block occupies the line.
    pub tag: u64,
    /// Which set the block maps to.
    pub set_index: usize,
    /// Byte offset within the block.
    pub offset: usize,
}

/// Decomposes `address` given a block size and set count that are both
/// powers of two.
///
/// `offset = address mod B`, `set_index = (address >> b) mod S`,
/// `tag = address >> (b + s)`, where `b = log2(B)` and `s = log2(S)`.
///
/// # Examples
///
/// ```
/// use cachesim_core::decoder::decode;
///
/// let d = decode(0x1234_5678, 16, 16);
/// assert_eq!(d.offset, 8);
/// assert_eq!(d.set_index, 7);
/// assert_eq!(d.tag, 0x123456);
/// ```
pub fn decode(address: u64, block_size: usize, num_sets: usize) -> DecodedAddress {
    debug_assert!(block_size.is_power_of_two());
    debug_assert!(num_sets.is_power_of_two());
    let b = block_size.trailing_zeros();
    let s = num_sets.trailing_zeros();
    let offset = (address & (block_size as u64 - 1)) as usize;
    let set_index = ((address >> b) & (num_sets as u64 - 1)) as usize;
    let tag = address >> (b + s);
    DecodedAddress {
        tag,
        set_index,
        offset,
    }
}
