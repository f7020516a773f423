//! Builder pattern for sharded bit vector construction.
//!
//! # Type-State Pattern
//!
//! The builder tracks whether the required width has been supplied in its
//! type. `build` only exists once it has, so forgetting the width is a
//! compile error rather than a runtime one. Optional parameters (shard
//! capacity) can be set in any state.
//!
//! # Diagnostics
//!
//! Constructors on [`ShardedBitVec`](crate::ShardedBitVec) are pure. The
//! builder is the place where the computed layout is reported, as a
//! `tracing` event at `debug` level. Install any `tracing` subscriber to see
//! it.
//!
//! # Examples
//!
//! ```
//! use shardbit::builder::ShardedBitVecBuilder;
//! use shardbit::core::SharedBitStore;
//!
//! let bits = ShardedBitVecBuilder::new()
//!     .width(1 << 20)
//!     .shard_bits(1 << 16)
//!     .build_shard_locked()?;
//!
//! bits.set(70_000)?;
//! assert!(bits.test(70_000)?);
//! assert_eq!(bits.shard_count(), 16);
//! # Ok::<(), shardbit::ShardBitError>(())
//! ```

pub mod sharded;

pub use sharded::ShardedBitVecBuilder;
