//! Builder for sharded bit vectors.
//!
//! # Examples
//!
//! ```
//! use shardbit::builder::ShardedBitVecBuilder;
//!
//! let bv = ShardedBitVecBuilder::new()
//!     .width(1_000)
//!     .shard_bits(256)
//!     .build()?;
//!
//! assert_eq!(bv.shard_count(), 4);
//! # Ok::<(), shardbit::ShardBitError>(())
//! ```
//!
//! A width is required; `build` does not exist until one is given:
//!
//! ```compile_fail
//! use shardbit::builder::ShardedBitVecBuilder;
//!
//! let bv = ShardedBitVecBuilder::new().shard_bits(64).build();
//! ```

use crate::core::addressing::SHARD_BITS;
use crate::core::{ShardLayout, ShardedBitVec};
use crate::error::Result;
use crate::sync::{ExclusiveBitVec, ShardLockedBitVec};
use std::marker::PhantomData;

/// Type-state marker: no width set yet.
pub struct Initial;

/// Type-state marker: width set, ready to build.
pub struct WithWidth;

/// Builder for [`ShardedBitVec`] and its locked wrappers.
///
/// # Type Parameters
///
/// - `State`: current builder state (`Initial`, `WithWidth`)
pub struct ShardedBitVecBuilder<State> {
    width: u64,
    shard_bits: u64,
    _state: PhantomData<State>,
}

impl ShardedBitVecBuilder<Initial> {
    /// Create a builder using the default shard capacity [`SHARD_BITS`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 0,
            shard_bits: SHARD_BITS,
            _state: PhantomData,
        }
    }

    /// Set the logical width in bits. Required.
    #[must_use]
    pub fn width(self, width: u64) -> ShardedBitVecBuilder<WithWidth> {
        ShardedBitVecBuilder {
            width,
            shard_bits: self.shard_bits,
            _state: PhantomData,
        }
    }
}

impl<State> ShardedBitVecBuilder<State> {
    /// Set the shard capacity in bits (optional, defaults to [`SHARD_BITS`]).
    ///
    /// Must be non-zero; checked at build time.
    #[must_use]
    pub fn shard_bits(mut self, shard_bits: u64) -> Self {
        self.shard_bits = shard_bits;
        self
    }
}

impl ShardedBitVecBuilder<WithWidth> {
    /// Build the bit vector.
    ///
    /// Emits a `debug` tracing event describing the computed layout.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::InvalidWidth`](crate::ShardBitError::InvalidWidth)
    /// if the shard capacity is zero or the layout is not addressable.
    pub fn build(self) -> Result<ShardedBitVec> {
        self.build_with_layout().map(|(bv, _)| bv)
    }

    /// Build the bit vector and return it with its computed layout.
    ///
    /// ```
    /// use shardbit::builder::ShardedBitVecBuilder;
    /// use shardbit::SHARD_BITS;
    ///
    /// let (bv, layout) = ShardedBitVecBuilder::new()
    ///     .width(SHARD_BITS + 5)
    ///     .build_with_layout()?;
    ///
    /// assert_eq!(layout.shard_count, 2);
    /// assert_eq!(layout.last_shard_bytes, 1);
    /// assert_eq!(bv.layout(), layout);
    /// # Ok::<(), shardbit::ShardBitError>(())
    /// ```
    pub fn build_with_layout(self) -> Result<(ShardedBitVec, ShardLayout)> {
        let bv = ShardedBitVec::with_shard_bits(self.width, self.shard_bits)?;
        let layout = bv.layout();

        tracing::debug!(
            width = layout.width,
            shard_bits = layout.shard_bits,
            shard_count = layout.shard_count,
            shard_bytes = layout.shard_bytes,
            last_shard_bytes = layout.last_shard_bytes,
            total_bytes = layout.total_bytes,
            "allocated sharded bit vector"
        );

        Ok((bv, layout))
    }

    /// Build a vector guarded by one whole-structure lock.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_exclusive(self) -> Result<ExclusiveBitVec> {
        self.build().map(ExclusiveBitVec::from)
    }

    /// Build a vector with one lock per shard.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_shard_locked(self) -> Result<ShardLockedBitVec> {
        self.build().map(ShardLockedBitVec::from)
    }
}

impl Default for ShardedBitVecBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}
