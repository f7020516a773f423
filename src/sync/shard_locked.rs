//! Per-shard reader/writer locking.
//!
//! # Design
//!
//! Shards are independent byte ranges and every point operation touches
//! exactly one of them, so each shard gets its own lock. Operations on
//! disjoint shards never contend; no operation ever needs two locks at once.
//!
//! ## Locking Protocol
//!
//! | Operation              | Locks Acquired      | Lock Type | Duration |
//! |------------------------|---------------------|-----------|----------|
//! | `set` / `clear` / `flip` | Addressed shard   | Write     | Brief    |
//! | `test`                 | Addressed shard     | Read      | Brief    |
//! | `count_ones`           | Each shard in turn  | Read      | Per shard |
//! | `reset`                | All shards          | Write     | Full     |
//!
//! `reset` acquires all locks in ascending shard order, so it cannot deadlock
//! against itself.
//!
//! ## False Sharing
//!
//! Each lock lives in its own 64-byte aligned slot so that hot shards do not
//! invalidate their neighbours' cache lines.
//!
//! # Examples
//!
//! ```
//! use shardbit::sync::ShardLockedBitVec;
//! use shardbit::core::SharedBitStore;
//! use std::sync::Arc;
//!
//! let bits = Arc::new(ShardLockedBitVec::with_shard_bits(4096, 1024)?);
//!
//! let handles: Vec<_> = (0..4u64)
//!     .map(|shard| {
//!         let bits = Arc::clone(&bits);
//!         std::thread::spawn(move || {
//!             // Each thread owns one shard: no contention.
//!             for b in shard * 1024..(shard + 1) * 1024 {
//!                 bits.set(b).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(bits.count_ones(), 4096);
//! # Ok::<(), shardbit::ShardBitError>(())
//! ```

use crate::core::addressing::{ShardGeometry, SHARD_BITS};
use crate::core::shard::Shard;
use crate::core::{ShardedBitVec, SharedBitStore};
use crate::error::{Result, ShardBitError};
use parking_lot::RwLock;
use std::fmt;

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// One shard and its lock, aligned to a cache line.
#[repr(align(64))]
struct LockedShard {
    shard: RwLock<Shard>,

    /// Read lock acquisitions (requires `metrics` feature).
    #[cfg(feature = "metrics")]
    read_count: AtomicU64,

    /// Write lock acquisitions (requires `metrics` feature).
    #[cfg(feature = "metrics")]
    write_count: AtomicU64,
}

impl LockedShard {
    fn new(shard: Shard) -> Self {
        Self {
            shard: RwLock::new(shard),
            #[cfg(feature = "metrics")]
            read_count: AtomicU64::new(0),
            #[cfg(feature = "metrics")]
            write_count: AtomicU64::new(0),
        }
    }

    #[inline]
    fn record_read(&self) {
        #[cfg(feature = "metrics")]
        self.read_count.fetch_add(1, AtomicOrdering::Relaxed);
    }

    #[inline]
    fn record_write(&self) {
        #[cfg(feature = "metrics")]
        self.write_count.fetch_add(1, AtomicOrdering::Relaxed);
    }
}

/// Per-shard lock statistics (requires `metrics` feature).
#[cfg(feature = "metrics")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardStats {
    /// Shard index in `[0, shard_count)`.
    pub shard_idx: usize,
    /// Read lock acquisitions (`test`, `count_ones`).
    pub read_ops: u64,
    /// Write lock acquisitions (`set`, `clear`, `flip`, `reset`).
    pub write_ops: u64,
}

/// Sharded bit vector with one reader/writer lock per shard.
pub struct ShardLockedBitVec {
    geometry: ShardGeometry,
    shards: Box<[LockedShard]>,
}

impl ShardLockedBitVec {
    /// Create a shard-locked bit vector addressing `width` bits.
    ///
    /// # Errors
    ///
    /// Same as [`ShardedBitVec::new`].
    pub fn new<W>(width: W) -> Result<Self>
    where
        W: TryInto<u64> + fmt::Display + Copy,
    {
        let width_bits: u64 = width.try_into().map_err(|_| {
            ShardBitError::invalid_width(width, "width must be a non-negative 64-bit integer")
        })?;
        Self::with_shard_bits(width_bits, SHARD_BITS)
    }

    /// Create a shard-locked bit vector with a custom shard capacity.
    ///
    /// # Errors
    ///
    /// Same as [`ShardedBitVec::with_shard_bits`].
    pub fn with_shard_bits(width: u64, shard_bits: u64) -> Result<Self> {
        ShardedBitVec::with_shard_bits(width, shard_bits).map(Self::from)
    }

    /// Number of shards (and locks).
    #[must_use]
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.geometry.shard_count()
    }

    /// Addressing geometry.
    #[must_use]
    #[inline]
    pub fn geometry(&self) -> &ShardGeometry {
        &self.geometry
    }

    /// Number of set bits.
    ///
    /// Shards are read one at a time, so the total is not a point-in-time
    /// snapshot while writers are active.
    #[must_use]
    pub fn count_ones(&self) -> u64 {
        self.shards
            .iter()
            .map(|locked| {
                locked.record_read();
                locked.shard.read().count_ones()
            })
            .sum()
    }

    /// Copy of shard `idx`'s bytes, or `None` past the end of the table.
    #[must_use]
    pub fn shard_snapshot(&self, idx: usize) -> Option<Vec<u8>> {
        self.shards.get(idx).map(|locked| {
            locked.record_read();
            locked.shard.read().as_bytes().to_vec()
        })
    }

    /// Consume the locks and reassemble a plain [`ShardedBitVec`].
    #[must_use]
    pub fn into_inner(self) -> ShardedBitVec {
        let shards = self
            .shards
            .into_vec()
            .into_iter()
            .map(|locked| locked.shard.into_inner())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        ShardedBitVec::from_parts(self.geometry, shards)
    }

    /// Per-shard lock statistics (requires `metrics` feature).
    ///
    /// ```
    /// # #[cfg(feature = "metrics")]
    /// # {
    /// use shardbit::sync::ShardLockedBitVec;
    /// use shardbit::core::SharedBitStore;
    ///
    /// let bits = ShardLockedBitVec::with_shard_bits(32, 16).unwrap();
    /// bits.set(20).unwrap();
    /// bits.test(20).unwrap();
    ///
    /// let stats = bits.shard_stats();
    /// assert_eq!(stats[1].write_ops, 1);
    /// assert_eq!(stats[1].read_ops, 1);
    /// assert_eq!(stats[0].write_ops, 0);
    /// # }
    /// ```
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn shard_stats(&self) -> Vec<ShardStats> {
        self.shards
            .iter()
            .enumerate()
            .map(|(shard_idx, locked)| ShardStats {
                shard_idx,
                read_ops: locked.read_count.load(AtomicOrdering::Relaxed),
                write_ops: locked.write_count.load(AtomicOrdering::Relaxed),
            })
            .collect()
    }

    #[inline]
    fn write_bit(&self, bit: u64, op: impl FnOnce(&mut Shard, usize, u8)) -> Result<()> {
        let addr = self.geometry.locate(bit)?;
        let locked = &self.shards[addr.shard];
        locked.record_write();
        op(&mut *locked.shard.write(), addr.byte, addr.offset);
        Ok(())
    }
}

impl From<ShardedBitVec> for ShardLockedBitVec {
    fn from(bv: ShardedBitVec) -> Self {
        let (geometry, shards) = bv.into_parts();
        let shards = shards
            .into_vec()
            .into_iter()
            .map(LockedShard::new)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { geometry, shards }
    }
}

impl SharedBitStore for ShardLockedBitVec {
    #[inline]
    fn width(&self) -> u64 {
        self.geometry.width()
    }

    fn set(&self, bit: u64) -> Result<()> {
        self.write_bit(bit, Shard::set)
    }

    fn clear(&self, bit: u64) -> Result<()> {
        self.write_bit(bit, Shard::clear)
    }

    fn test(&self, bit: u64) -> Result<bool> {
        let addr = self.geometry.locate(bit)?;
        let locked = &self.shards[addr.shard];
        locked.record_read();
        let value = locked.shard.read().test(addr.byte, addr.offset);
        Ok(value)
    }

    fn flip(&self, bit: u64) -> Result<()> {
        self.write_bit(bit, Shard::flip)
    }

    fn reset(&self) {
        // Ascending order; all guards held until every shard is zeroed.
        let mut guards: Vec<_> = self
            .shards
            .iter()
            .map(|locked| {
                locked.record_write();
                locked.shard.write()
            })
            .collect();

        for guard in &mut guards {
            guard.reset();
        }

        tracing::trace!(shards = guards.len(), "reset shard-locked bit vector");
    }
}

impl fmt::Debug for ShardLockedBitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardLockedBitVec")
            .field("width", &self.geometry.width())
            .field("shard_bits", &self.geometry.shard_bits())
            .field("shard_count", &self.geometry.shard_count())
            .finish()
    }
}
