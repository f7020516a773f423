//! Whole-structure reader/writer locking.
//!
//! [`ExclusiveBitVec`] wraps a [`ShardedBitVec`] in a single
//! `parking_lot::RwLock`: any number of concurrent readers, or one writer.
//! Simple and predictable; every mutation serializes against every other
//! operation regardless of which shard it touches. Use
//! [`ShardLockedBitVec`](super::ShardLockedBitVec) when writers on different
//! shards should not contend.
//!
//! # Examples
//!
//! ```
//! use shardbit::sync::ExclusiveBitVec;
//! use shardbit::core::SharedBitStore;
//! use std::sync::Arc;
//!
//! let bits = Arc::new(ExclusiveBitVec::new(1024)?);
//!
//! let handles: Vec<_> = (0..4u64)
//!     .map(|t| {
//!         let bits = Arc::clone(&bits);
//!         std::thread::spawn(move || {
//!             for b in (t..1024).step_by(4) {
//!                 bits.set(b).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(bits.with_read(|bv| bv.count_ones()), 1024);
//! # Ok::<(), shardbit::ShardBitError>(())
//! ```

use crate::core::{ShardedBitVec, SharedBitStore};
use crate::error::Result;
use parking_lot::RwLock;
use std::fmt;

/// A [`ShardedBitVec`] behind one reader/writer lock.
pub struct ExclusiveBitVec {
    inner: RwLock<ShardedBitVec>,
    width: u64,
}

impl ExclusiveBitVec {
    /// Create a locked bit vector addressing `width` bits.
    ///
    /// # Errors
    ///
    /// Same as [`ShardedBitVec::new`].
    pub fn new<W>(width: W) -> Result<Self>
    where
        W: TryInto<u64> + fmt::Display + Copy,
    {
        ShardedBitVec::new(width).map(Self::from)
    }

    /// Run `f` with shared access to the inner vector.
    pub fn with_read<R>(&self, f: impl FnOnce(&ShardedBitVec) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the inner vector.
    ///
    /// Useful for multi-bit updates that must appear atomic to readers.
    ///
    /// ```
    /// use shardbit::sync::ExclusiveBitVec;
    ///
    /// let bits = ExclusiveBitVec::new(64)?;
    /// bits.with_write(|bv| bv.set_range(0, 32, true))?;
    /// assert_eq!(bits.with_read(|bv| bv.count_ones()), 32);
    /// # Ok::<(), shardbit::ShardBitError>(())
    /// ```
    pub fn with_write<R>(&self, f: impl FnOnce(&mut ShardedBitVec) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Consume the lock and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> ShardedBitVec {
        self.inner.into_inner()
    }
}

impl From<ShardedBitVec> for ExclusiveBitVec {
    fn from(bv: ShardedBitVec) -> Self {
        Self {
            width: bv.len(),
            inner: RwLock::new(bv),
        }
    }
}

impl SharedBitStore for ExclusiveBitVec {
    #[inline]
    fn width(&self) -> u64 {
        self.width
    }

    fn set(&self, bit: u64) -> Result<()> {
        self.inner.write().set(bit)
    }

    fn clear(&self, bit: u64) -> Result<()> {
        self.inner.write().clear(bit)
    }

    fn test(&self, bit: u64) -> Result<bool> {
        self.inner.read().test(bit)
    }

    fn flip(&self, bit: u64) -> Result<()> {
        self.inner.write().flip(bit)
    }

    fn reset(&self) {
        self.inner.write().reset();
    }
}

impl fmt::Debug for ExclusiveBitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusiveBitVec")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_basic_ops() {
        let bits = ExclusiveBitVec::new(10).unwrap();
        bits.set(3).unwrap();
        assert!(bits.test(3).unwrap());
        assert!(!bits.test(4).unwrap());
        bits.flip(4).unwrap();
        assert!(bits.test(4).unwrap());
        bits.clear(3).unwrap();
        assert!(!bits.test(3).unwrap());
        assert!(bits.set(10).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_reset_and_into_inner() {
        let bits = ExclusiveBitVec::new(20).unwrap();
        bits.set(1).unwrap();
        bits.set(19).unwrap();
        bits.reset();
        bits.set(5).unwrap();

        let bv = bits.into_inner();
        assert_eq!(bv.iter_ones().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_concurrent_writers_no_lost_updates() {
        // Threads share bytes, so updates would be lost without the lock.
        let bits = Arc::new(ExclusiveBitVec::new(800).unwrap());

        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let bits = Arc::clone(&bits);
                thread::spawn(move || {
                    for b in (t..800).step_by(8) {
                        bits.set(b).unwrap();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(bits.with_read(ShardedBitVec::count_ones), 800);
    }

    #[test]
    fn test_from_sharded_bitvec() {
        let mut bv = ShardedBitVec::with_shard_bits(30, 8).unwrap();
        bv.set(17).unwrap();
        let bits = ExclusiveBitVec::from(bv);
        assert_eq!(bits.width(), 30);
        assert!(bits.test(17).unwrap());
    }
}
