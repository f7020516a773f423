//! Sharded bit vector over a 64-bit bit space.
//!
//! # Overview
//!
//! `ShardedBitVec` owns a fixed table of byte shards. Each shard covers
//! [`SHARD_BITS`] bits (the largest index a signed 32-bit integer can hold),
//! so the addressable width is bounded only by `u64` and available memory,
//! not by the index range of a single flat array.
//!
//! # Memory Layout
//!
//! ```text
//! shard 0: [bit 0 .. bit SHARD_BITS)              ceil(SHARD_BITS / 8) bytes
//! shard 1: [bit SHARD_BITS .. bit 2*SHARD_BITS)   ceil(SHARD_BITS / 8) bytes
//! ...
//! shard N-1: remaining bits                       only as many bytes as needed
//! ```
//!
//! Within a byte, bit offset 0 is the least-significant bit.
//!
//! # Lifecycle
//!
//! Every shard is allocated (zeroed) eagerly in the constructor. The shard
//! table never changes shape afterwards; only individual bits are mutated.
//!
//! # Performance Characteristics
//!
//! - `set` / `clear` / `test` / `flip`: O(1), one division pair plus one byte access
//! - `count_ones`, `iter_ones`: O(width / 8)
//! - Space: `ceil(width / 8)` bytes plus at most one partial byte per shard
//!
//! # Examples
//!
//! ```
//! use shardbit::ShardedBitVec;
//!
//! let mut bv = ShardedBitVec::new(10)?;
//! bv.set(3)?;
//! assert!(bv.test(3)?);
//! assert!(!bv.test(2)?);
//! assert!(!bv.test(4)?);
//!
//! assert!(bv.set(10).is_err());
//! # Ok::<(), shardbit::ShardBitError>(())
//! ```

use super::addressing::{ShardGeometry, SHARD_BITS};
use super::shard::Shard;
use super::store::BitStore;
use crate::error::{Result, ShardBitError};
use std::fmt;

/// Fixed-width bit vector split across byte shards.
///
/// # Type Properties
///
/// - `Send + Sync`: plain owned bytes, no interior mutability
/// - `Clone`: deep copy of every shard
/// - `Debug`: prints the geometry, never the shard contents
#[derive(Clone, PartialEq, Eq)]
pub struct ShardedBitVec {
    geometry: ShardGeometry,
    shards: Box<[Shard]>,
}

impl ShardedBitVec {
    /// Create a bit vector addressing `width` bits, all clear.
    ///
    /// Accepts any integer type; `width == 0` is legal and yields zero shards.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::InvalidWidth`] if `width` is negative or its
    /// backing storage cannot be addressed on this platform.
    ///
    /// # Examples
    ///
    /// ```
    /// use shardbit::ShardedBitVec;
    ///
    /// let bv = ShardedBitVec::new(1000)?;
    /// assert_eq!(bv.len(), 1000);
    /// assert_eq!(bv.shard_count(), 1);
    ///
    /// assert!(ShardedBitVec::new(-1).is_err());
    /// # Ok::<(), shardbit::ShardBitError>(())
    /// ```
    pub fn new<W>(width: W) -> Result<Self>
    where
        W: TryInto<u64> + fmt::Display + Copy,
    {
        let width_bits: u64 = width.try_into().map_err(|_| {
            ShardBitError::invalid_width(width, "width must be a non-negative 64-bit integer")
        })?;
        Self::with_shard_bits(width_bits, SHARD_BITS)
    }

    /// Create a bit vector with a custom shard capacity.
    ///
    /// Addressing follows the same rules as [`new`](Self::new) with
    /// `shard_bits` in place of [`SHARD_BITS`].
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::InvalidWidth`] if `shard_bits` is zero or the
    /// layout cannot be addressed on this platform.
    ///
    /// # Examples
    ///
    /// ```
    /// use shardbit::ShardedBitVec;
    ///
    /// let bv = ShardedBitVec::with_shard_bits(100, 64)?;
    /// assert_eq!(bv.shard_count(), 2);
    /// assert_eq!(bv.shard(1).unwrap().len(), 5);
    /// # Ok::<(), shardbit::ShardBitError>(())
    /// ```
    pub fn with_shard_bits(width: u64, shard_bits: u64) -> Result<Self> {
        let geometry = ShardGeometry::new(width, shard_bits)?;
        let shards = (0..geometry.shard_count())
            .map(|idx| Shard::zeroed(geometry.shard_bytes(idx)))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self { geometry, shards })
    }

    /// Reassemble a vector from shards produced under `geometry`.
    pub(crate) fn from_parts(geometry: ShardGeometry, shards: Box<[Shard]>) -> Self {
        debug_assert_eq!(shards.len(), geometry.shard_count());
        Self { geometry, shards }
    }

    /// Split into geometry and shard storage.
    pub(crate) fn into_parts(self) -> (ShardGeometry, Box<[Shard]>) {
        (self.geometry, self.shards)
    }

    /// Logical width in bits.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> u64 {
        self.geometry.width()
    }

    /// Returns `true` for a zero-width vector.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.geometry.width() == 0
    }

    /// Number of shards in the table.
    #[must_use]
    #[inline]
    pub const fn shard_count(&self) -> usize {
        self.geometry.shard_count()
    }

    /// Capacity of a full shard in bits.
    #[must_use]
    #[inline]
    pub const fn shard_bits(&self) -> u64 {
        self.geometry.shard_bits()
    }

    /// Addressing geometry.
    #[must_use]
    #[inline]
    pub const fn geometry(&self) -> &ShardGeometry {
        &self.geometry
    }

    /// Raw bytes of shard `idx`, or `None` past the end of the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use shardbit::ShardedBitVec;
    ///
    /// let mut bv = ShardedBitVec::new(16)?;
    /// bv.set(0)?;
    /// bv.set(7)?;
    /// assert_eq!(bv.shard(0).unwrap()[0], 0b1000_0001);
    /// # Ok::<(), shardbit::ShardBitError>(())
    /// ```
    #[must_use]
    pub fn shard(&self, idx: usize) -> Option<&[u8]> {
        self.shards.get(idx).map(Shard::as_bytes)
    }

    /// Set `bit` to 1.
    ///
    /// Only the target bit changes; the other bits of its byte are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::OutOfRange`] if `bit >= len()`.
    #[inline]
    pub fn set(&mut self, bit: u64) -> Result<()> {
        let addr = self.geometry.locate(bit)?;
        self.shards[addr.shard].set(addr.byte, addr.offset);
        Ok(())
    }

    /// Clear `bit` to 0.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::OutOfRange`] if `bit >= len()`.
    #[inline]
    pub fn clear(&mut self, bit: u64) -> Result<()> {
        let addr = self.geometry.locate(bit)?;
        self.shards[addr.shard].clear(addr.byte, addr.offset);
        Ok(())
    }

    /// Read `bit`.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::OutOfRange`] if `bit >= len()`.
    #[inline]
    pub fn test(&self, bit: u64) -> Result<bool> {
        let addr = self.geometry.locate(bit)?;
        Ok(self.shards[addr.shard].test(addr.byte, addr.offset))
    }

    /// Toggle `bit`.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::OutOfRange`] if `bit >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shardbit::ShardedBitVec;
    ///
    /// let mut bv = ShardedBitVec::new(8)?;
    /// bv.flip(5)?;
    /// assert!(bv.test(5)?);
    /// bv.flip(5)?;
    /// assert!(!bv.test(5)?);
    /// # Ok::<(), shardbit::ShardBitError>(())
    /// ```
    #[inline]
    pub fn flip(&mut self, bit: u64) -> Result<()> {
        let addr = self.geometry.locate(bit)?;
        self.shards[addr.shard].flip(addr.byte, addr.offset);
        Ok(())
    }

    /// Set every bit in `[start, end)` to `value`.
    ///
    /// The range may straddle shard boundaries. An empty range (`start >= end`)
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::OutOfRange`] if `end > len()`. The range is
    /// validated before any bit is written, so a failed call changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use shardbit::ShardedBitVec;
    ///
    /// let mut bv = ShardedBitVec::with_shard_bits(100, 16)?;
    /// bv.set_range(10, 40, true)?;
    /// assert!(!bv.test(9)?);
    /// assert!(bv.test(10)?);
    /// assert!(bv.test(39)?);
    /// assert!(!bv.test(40)?);
    /// assert_eq!(bv.count_ones(), 30);
    /// # Ok::<(), shardbit::ShardBitError>(())
    /// ```
    pub fn set_range(&mut self, start: u64, end: u64, value: bool) -> Result<()> {
        if start >= end {
            return Ok(());
        }
        if end > self.len() {
            return Err(ShardBitError::out_of_range(end - 1, self.len()));
        }

        let shard_bits = self.shard_bits();
        let fill = if value { 0xFF } else { 0x00 };
        let mut bit = start;

        while bit < end {
            let addr = self.geometry.locate(bit)?;
            let within = bit % shard_bits;

            // Whole-byte fast path; the trailing byte of a shard may be partial.
            if addr.offset == 0 && end - bit >= 8 && within + 8 <= shard_bits {
                self.shards[addr.shard].store_byte(addr.byte, fill);
                bit += 8;
                continue;
            }

            let shard = &mut self.shards[addr.shard];
            if value {
                shard.set(addr.byte, addr.offset);
            } else {
                shard.clear(addr.byte, addr.offset);
            }
            bit += 1;
        }

        Ok(())
    }

    /// Clear every bit. Shard shape is unchanged.
    pub fn reset(&mut self) {
        for shard in self.shards.iter_mut() {
            shard.reset();
        }
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> u64 {
        self.shards.iter().map(Shard::count_ones).sum()
    }

    /// Iterate over the bit numbers of all set bits, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use shardbit::ShardedBitVec;
    ///
    /// let mut bv = ShardedBitVec::with_shard_bits(40, 10)?;
    /// for b in [1, 9, 10, 33] {
    ///     bv.set(b)?;
    /// }
    /// assert_eq!(bv.iter_ones().collect::<Vec<_>>(), vec![1, 9, 10, 33]);
    /// # Ok::<(), shardbit::ShardBitError>(())
    /// ```
    pub fn iter_ones(&self) -> impl Iterator<Item = u64> + '_ {
        let geometry = self.geometry;
        self.shards
            .iter()
            .enumerate()
            .flat_map(move |(idx, shard)| {
                let base = geometry.shard_start(idx);
                shard
                    .as_bytes()
                    .iter()
                    .enumerate()
                    .filter(|(_, byte)| **byte != 0)
                    .flat_map(move |(byte_idx, &byte)| {
                        (0..8u8)
                            .filter(move |offset| (byte >> offset) & 1 == 1)
                            .map(move |offset| base + byte_idx as u64 * 8 + u64::from(offset))
                    })
            })
    }

    /// Bytes of shard storage held by this vector.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.shards.len() * std::mem::size_of::<Shard>()
            + self.shards.iter().map(Shard::len_bytes).sum::<usize>()
    }

    /// Snapshot of the computed layout, for diagnostics.
    #[must_use]
    pub fn layout(&self) -> ShardLayout {
        ShardLayout::from_geometry(&self.geometry)
    }
}

impl fmt::Debug for ShardedBitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedBitVec")
            .field("width", &self.geometry.width())
            .field("shard_bits", &self.geometry.shard_bits())
            .field("shard_count", &self.geometry.shard_count())
            .finish()
    }
}

impl BitStore for ShardedBitVec {
    fn width(&self) -> u64 {
        self.len()
    }

    fn set(&mut self, bit: u64) -> Result<()> {
        ShardedBitVec::set(self, bit)
    }

    fn clear(&mut self, bit: u64) -> Result<()> {
        ShardedBitVec::clear(self, bit)
    }

    fn test(&self, bit: u64) -> Result<bool> {
        ShardedBitVec::test(self, bit)
    }

    fn flip(&mut self, bit: u64) -> Result<()> {
        ShardedBitVec::flip(self, bit)
    }
}

/// Computed shard parameters of a bit vector.
///
/// Pure value; reporting it is left to the caller (see the builder, which
/// emits it as a `tracing` event).
///
/// # Examples
///
/// ```
/// use shardbit::ShardedBitVec;
///
/// let layout = ShardedBitVec::with_shard_bits(100, 64)?.layout();
/// assert_eq!(layout.shard_count, 2);
/// assert_eq!(layout.last_shard_bytes, 5);
/// assert_eq!(
///     layout.to_string(),
///     "width=100; shard_bits=64; shard_count=2; shard_bytes=8; last_shard_bytes=5; total_bytes=13"
/// );
/// # Ok::<(), shardbit::ShardBitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardLayout {
    /// Logical width in bits.
    pub width: u64,
    /// Capacity of a full shard in bits.
    pub shard_bits: u64,
    /// Number of shards.
    pub shard_count: usize,
    /// Byte length of a full shard (0 when there are no shards).
    pub shard_bytes: usize,
    /// Byte length of the final shard (0 when there are no shards).
    pub last_shard_bytes: usize,
    /// Total backing bytes.
    pub total_bytes: u64,
}

impl ShardLayout {
    fn from_geometry(geometry: &ShardGeometry) -> Self {
        let count = geometry.shard_count();
        Self {
            width: geometry.width(),
            shard_bits: geometry.shard_bits(),
            shard_count: count,
            shard_bytes: geometry.shard_bytes(0),
            last_shard_bytes: count.checked_sub(1).map_or(0, |last| geometry.shard_bytes(last)),
            total_bytes: geometry.total_bytes(),
        }
    }
}

impl fmt::Display for ShardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "width={}; shard_bits={}; shard_count={}; shard_bytes={}; last_shard_bytes={}; total_bytes={}",
            self.width,
            self.shard_bits,
            self.shard_count,
            self.shard_bytes,
            self.last_shard_bytes,
            self.total_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let bv = ShardedBitVec::new(1000).unwrap();
        assert_eq!(bv.len(), 1000);
        assert_eq!(bv.shard_count(), 1);
        assert_eq!(bv.shard(0).unwrap().len(), 125);
        assert_eq!(bv.count_ones(), 0);
    }

    #[test]
    fn test_new_zero_width() {
        let bv = ShardedBitVec::new(0).unwrap();
        assert!(bv.is_empty());
        assert_eq!(bv.shard_count(), 0);
        assert!(bv.shard(0).is_none());
    }

    #[test]
    fn test_new_negative_width_error() {
        let err = ShardedBitVec::new(-1i64).unwrap_err();
        assert!(matches!(err, ShardBitError::InvalidWidth { .. }));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_new_accepts_unsigned_types() {
        assert_eq!(ShardedBitVec::new(64usize).unwrap().len(), 64);
        assert_eq!(ShardedBitVec::new(64u8).unwrap().len(), 64);
        assert_eq!(ShardedBitVec::new(64u64).unwrap().len(), 64);
    }

    #[test]
    fn test_all_clear_after_construction() {
        for width in [1u64, 7, 8, 9, 63, 64, 65, 200] {
            let bv = ShardedBitVec::with_shard_bits(width, 16).unwrap();
            for b in 0..width {
                assert!(!bv.test(b).unwrap(), "width {width}: bit {b} should be clear");
            }
        }
    }

    #[test]
    fn test_set_test_neighbours() {
        let mut bv = ShardedBitVec::new(10).unwrap();
        bv.set(3).unwrap();
        assert!(bv.test(3).unwrap());
        assert!(!bv.test(2).unwrap());
        assert!(!bv.test(4).unwrap());
    }

    #[test]
    fn test_set_clear_roundtrip() {
        let mut bv = ShardedBitVec::with_shard_bits(50, 12).unwrap();
        for b in 0..50 {
            bv.set(b).unwrap();
            assert!(bv.test(b).unwrap());
            bv.clear(b).unwrap();
            assert!(!bv.test(b).unwrap());
        }
    }

    #[test]
    fn test_set_does_not_disturb_other_bits() {
        let mut bv = ShardedBitVec::with_shard_bits(24, 12).unwrap();
        for b in (0..24).step_by(3) {
            bv.set(b).unwrap();
        }
        for b in 0..24 {
            assert_eq!(bv.test(b).unwrap(), b % 3 == 0, "bit {b}");
        }
    }

    #[test]
    fn test_underlying_byte_pattern() {
        let mut bv = ShardedBitVec::new(16).unwrap();
        bv.set(0).unwrap();
        bv.set(7).unwrap();
        assert_eq!(bv.shard(0).unwrap()[0], 0b1000_0001);
        bv.clear(0).unwrap();
        assert_eq!(bv.shard(0).unwrap()[0], 0b1000_0000);
        assert_eq!(bv.shard(0).unwrap()[1], 0);
    }

    #[test]
    fn test_double_flip_restores() {
        let mut bv = ShardedBitVec::new(9).unwrap();
        bv.set(8).unwrap();
        let before = bv.clone();
        for b in 0..9 {
            bv.flip(b).unwrap();
            bv.flip(b).unwrap();
        }
        assert_eq!(bv, before);
    }

    #[test]
    fn test_out_of_range_leaves_bits_unchanged() {
        let mut bv = ShardedBitVec::new(10).unwrap();
        bv.set(1).unwrap();
        let before = bv.clone();

        assert_eq!(bv.set(10), Err(ShardBitError::out_of_range(10, 10)));
        assert_eq!(bv.clear(11), Err(ShardBitError::out_of_range(11, 10)));
        assert_eq!(bv.flip(u64::MAX), Err(ShardBitError::out_of_range(u64::MAX, 10)));
        assert_eq!(bv.test(10), Err(ShardBitError::out_of_range(10, 10)));
        assert_eq!(bv, before);
    }

    #[test]
    fn test_zero_width_rejects_everything() {
        let mut bv = ShardedBitVec::new(0).unwrap();
        assert!(bv.set(0).unwrap_err().is_out_of_range());
        assert!(bv.clear(0).unwrap_err().is_out_of_range());
        assert!(bv.test(0).unwrap_err().is_out_of_range());
        assert!(bv.flip(0).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_small_shards_boundary() {
        let mut bv = ShardedBitVec::with_shard_bits(21, 10).unwrap();
        assert_eq!(bv.shard_count(), 3);
        assert_eq!(bv.shard(2).unwrap().len(), 1);

        bv.set(10).unwrap();
        assert!(!bv.test(9).unwrap());
        assert_eq!(bv.shard(1).unwrap()[0], 0b0000_0001);
        assert_eq!(bv.shard(0).unwrap(), &[0, 0]);

        bv.set(20).unwrap();
        assert_eq!(bv.shard(2).unwrap()[0], 0b0000_0001);
    }

    #[test]
    fn test_set_range_across_shards() {
        let mut bv = ShardedBitVec::with_shard_bits(100, 13).unwrap();
        bv.set_range(5, 90, true).unwrap();
        assert_eq!(bv.count_ones(), 85);
        assert!(!bv.test(4).unwrap());
        assert!(bv.test(5).unwrap());
        assert!(bv.test(89).unwrap());
        assert!(!bv.test(90).unwrap());

        bv.set_range(20, 30, false).unwrap();
        assert_eq!(bv.count_ones(), 75);
        assert!(bv.test(19).unwrap());
        assert!(!bv.test(20).unwrap());
        assert!(!bv.test(29).unwrap());
        assert!(bv.test(30).unwrap());
    }

    #[test]
    fn test_set_range_partial_trailing_byte() {
        // 7-bit shards: every byte is partial, fast path must never fire.
        let mut bv = ShardedBitVec::with_shard_bits(28, 7).unwrap();
        bv.set_range(0, 28, true).unwrap();
        assert_eq!(bv.count_ones(), 28);
        for idx in 0..4 {
            assert_eq!(bv.shard(idx).unwrap(), &[0b0111_1111]);
        }
    }

    #[test]
    fn test_set_range_empty_and_invalid() {
        let mut bv = ShardedBitVec::new(32).unwrap();
        bv.set_range(10, 10, true).unwrap();
        bv.set_range(12, 4, true).unwrap();
        assert_eq!(bv.count_ones(), 0);

        assert_eq!(
            bv.set_range(0, 33, true),
            Err(ShardBitError::out_of_range(32, 32))
        );
        assert_eq!(bv.count_ones(), 0);
    }

    #[test]
    fn test_reset() {
        let mut bv = ShardedBitVec::with_shard_bits(64, 16).unwrap();
        bv.set_range(0, 64, true).unwrap();
        bv.reset();
        assert_eq!(bv.count_ones(), 0);
        assert_eq!(bv.shard_count(), 4);
    }

    #[test]
    fn test_iter_ones() {
        let mut bv = ShardedBitVec::with_shard_bits(30, 9).unwrap();
        let bits = [0, 8, 9, 17, 18, 29];
        for b in bits {
            bv.set(b).unwrap();
        }
        assert_eq!(bv.iter_ones().collect::<Vec<_>>(), bits);
    }

    #[test]
    fn test_layout() {
        let layout = ShardedBitVec::new(0).unwrap().layout();
        assert_eq!(layout.shard_count, 0);
        assert_eq!(layout.shard_bytes, 0);
        assert_eq!(layout.last_shard_bytes, 0);
        assert_eq!(layout.total_bytes, 0);

        let layout = ShardedBitVec::with_shard_bits(20, 8).unwrap().layout();
        assert_eq!(layout.shard_count, 3);
        assert_eq!(layout.shard_bytes, 1);
        assert_eq!(layout.last_shard_bytes, 1);
        assert_eq!(layout.total_bytes, 3);
    }

    #[test]
    fn test_bit_store_trait() {
        fn exercise<S: BitStore>(store: &mut S) {
            store.set(1).unwrap();
            store.flip(2).unwrap();
            store.clear(1).unwrap();
            assert!(!store.test(1).unwrap());
            assert!(store.test(2).unwrap());
            assert!(!store.is_empty());
        }

        let mut bv = ShardedBitVec::new(4).unwrap();
        exercise(&mut bv);
        assert_eq!(bv.count_ones(), 1);
    }

    #[test]
    fn test_memory_usage() {
        let bv = ShardedBitVec::with_shard_bits(1000, 512).unwrap();
        assert!(bv.memory_usage() >= 125);
    }

    #[test]
    fn test_debug() {
        let bv = ShardedBitVec::with_shard_bits(10, 8).unwrap();
        let debug = format!("{bv:?}");
        assert!(debug.contains("width: 10"));
        assert!(debug.contains("shard_count: 2"));
    }

    #[test]
    fn test_parts_roundtrip() {
        let mut bv = ShardedBitVec::with_shard_bits(40, 16).unwrap();
        bv.set(33).unwrap();
        let (geometry, shards) = bv.clone().into_parts();
        assert_eq!(ShardedBitVec::from_parts(geometry, shards), bv);
    }
}
