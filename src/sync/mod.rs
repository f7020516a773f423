//! Thread-safe wrappers around [`ShardedBitVec`](crate::ShardedBitVec).
//!
//! The bit vector itself is a passive store with no synchronization. When
//! concurrent access is needed, pick one of two disciplines explicitly:
//!
//! - [`ExclusiveBitVec`] - one reader/writer lock over the whole structure.
//!   Readers run concurrently with each other, never with a writer.
//! - [`ShardLockedBitVec`] - one reader/writer lock per shard. Every point
//!   operation touches exactly one shard, so work on disjoint shards never
//!   contends and no cross-shard coordination is required.
//!
//! Both implement [`SharedBitStore`](crate::core::SharedBitStore) and use
//! `parking_lot::RwLock` (writer-fair, no poisoning).
//!
//! | Wrapper             | Writers on different shards | Memory overhead   |
//! |---------------------|-----------------------------|-------------------|
//! | `ExclusiveBitVec`   | Serialized                  | One lock          |
//! | `ShardLockedBitVec` | Parallel                    | 64 bytes / shard  |
//!
//! # Examples
//!
//! ```
//! use shardbit::sync::{ExclusiveBitVec, ShardLockedBitVec};
//! use shardbit::core::SharedBitStore;
//!
//! fn mark<S: SharedBitStore>(store: &S) -> shardbit::Result<()> {
//!     store.set(0)?;
//!     store.flip(1)?;
//!     Ok(())
//! }
//!
//! let a = ExclusiveBitVec::new(8)?;
//! let b = ShardLockedBitVec::with_shard_bits(8, 4)?;
//! mark(&a)?;
//! mark(&b)?;
//! let a_ones: Vec<u64> = a.into_inner().iter_ones().collect();
//! let b_ones: Vec<u64> = b.into_inner().iter_ones().collect();
//! assert_eq!(a_ones, vec![0, 1]);
//! assert_eq!(a_ones, b_ones);
//! # Ok::<(), shardbit::ShardBitError>(())
//! ```

pub mod exclusive;
pub mod shard_locked;

pub use exclusive::ExclusiveBitVec;
pub use shard_locked::ShardLockedBitVec;

#[cfg(feature = "metrics")]
pub use shard_locked::ShardStats;
