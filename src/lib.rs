//! shardbit: a sharded bit vector for bit spaces wider than one flat array.
//!
//! A single byte array indexed by a signed 32-bit integer tops out at
//! `i32::MAX` elements. `shardbit` addresses a full 64-bit bit space by
//! splitting it into shards of [`SHARD_BITS`] bits each and mapping every bit
//! number to `(shard, byte, offset)` coordinates.
//!
//! # Quick Start
//!
//! ```
//! use shardbit::ShardedBitVec;
//!
//! let mut bv = ShardedBitVec::new(16)?;
//! bv.set(0)?;
//! bv.set(7)?;
//! assert_eq!(bv.shard(0).unwrap()[0], 0b1000_0001);
//!
//! bv.clear(0)?;
//! assert_eq!(bv.shard(0).unwrap()[0], 0b1000_0000);
//!
//! // Addressing outside [0, width) is an error, never a silent no-op.
//! assert!(bv.test(16).is_err());
//! # Ok::<(), shardbit::ShardBitError>(())
//! ```
//!
//! # Addressing
//!
//! ```text
//! shard  = bit / SHARD_BITS
//! within = bit % SHARD_BITS
//! byte   = within / 8
//! offset = within % 8          (0 = least-significant bit)
//! ```
//!
//! The shard count is `ceil(width / SHARD_BITS)`; the last shard holds only
//! as many bytes as its remaining bits need. All shards are allocated and
//! zeroed up front, and the table never changes shape.
//!
//! # Concurrency
//!
//! [`ShardedBitVec`] is a plain owned value (`&mut self` mutators). For
//! shared access choose a discipline from [`sync`]:
//!
//! ```
//! use shardbit::sync::ShardLockedBitVec;
//! use shardbit::core::SharedBitStore;
//! use std::sync::Arc;
//!
//! let bits = Arc::new(ShardLockedBitVec::with_shard_bits(1 << 12, 1 << 10)?);
//! let clone = Arc::clone(&bits);
//! std::thread::spawn(move || clone.set(2048).unwrap())
//!     .join()
//!     .unwrap();
//! assert!(bits.test(2048)?);
//! # Ok::<(), shardbit::ShardBitError>(())
//! ```
//!
//! # Features
//!
//! - `metrics` - per-shard lock counters on [`ShardLockedBitVec`]
//! - `proptest` - enable the property-based test suites

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

/// Core data structures and traits
pub mod core;

/// Error types and result aliases
pub mod error;

/// Lock wrappers for shared access
pub mod sync;

/// Type-safe builder
pub mod builder;

pub use error::{Result, ShardBitError};

pub use crate::core::addressing::SHARD_BITS;
pub use crate::core::{BitStore, ShardLayout, ShardedBitVec, SharedBitStore};

pub use builder::ShardedBitVecBuilder;
pub use sync::{ExclusiveBitVec, ShardLockedBitVec};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use shardbit::prelude::*;
///
/// let mut bv = ShardedBitVec::new(100)?;
/// bv.set(42)?;
/// assert!(bv.test(42)?);
/// # Ok::<(), ShardBitError>(())
/// ```
pub mod prelude {
    pub use crate::builder::ShardedBitVecBuilder;
    pub use crate::core::{BitStore, ShardLayout, ShardedBitVec, SharedBitStore, SHARD_BITS};
    pub use crate::error::{Result, ShardBitError};
    pub use crate::sync::{ExclusiveBitVec, ShardLockedBitVec};

    #[cfg(feature = "metrics")]
    pub use crate::sync::ShardStats;
}
