//! Access traits for bit stores.
//!
//! Two access models are provided:
//!
//! - [`BitStore`]: mutators take `&mut self`. Single owner, or wrapped by the
//!   caller in a lock of their choosing.
//! - [`SharedBitStore`]: mutators take `&self`; the implementation carries its
//!   own synchronization and can be shared through an `Arc`.
//!
//! Both expose the same point operations with the same error contract: any
//! bit number outside `[0, width)` yields
//! [`ShardBitError::OutOfRange`](crate::ShardBitError::OutOfRange) and leaves
//! the store unchanged.

use crate::error::Result;

/// Bit store with exclusive (`&mut self`) mutation.
///
/// # Examples
///
/// ```
/// use shardbit::core::BitStore;
/// use shardbit::ShardedBitVec;
///
/// fn mark_even<S: BitStore>(store: &mut S) -> shardbit::Result<()> {
///     for b in (0..store.width()).step_by(2) {
///         store.set(b)?;
///     }
///     Ok(())
/// }
///
/// let mut bv = ShardedBitVec::new(10)?;
/// mark_even(&mut bv)?;
/// assert!(bv.test(4)?);
/// assert!(!bv.test(5)?);
/// # Ok::<(), shardbit::ShardBitError>(())
/// ```
pub trait BitStore {
    /// Logical width in bits.
    fn width(&self) -> u64;

    /// Set `bit` to 1.
    fn set(&mut self, bit: u64) -> Result<()>;

    /// Clear `bit` to 0.
    fn clear(&mut self, bit: u64) -> Result<()>;

    /// Read `bit`.
    fn test(&self, bit: u64) -> Result<bool>;

    /// Toggle `bit`.
    fn flip(&mut self, bit: u64) -> Result<()>;

    /// Returns `true` if the store addresses no bits.
    fn is_empty(&self) -> bool {
        self.width() == 0
    }
}

/// Bit store with interior synchronization (`&self` mutation).
///
/// Implementors are `Send + Sync` so they can be shared across threads.
pub trait SharedBitStore: Send + Sync {
    /// Logical width in bits.
    fn width(&self) -> u64;

    /// Set `bit` to 1.
    fn set(&self, bit: u64) -> Result<()>;

    /// Clear `bit` to 0.
    fn clear(&self, bit: u64) -> Result<()>;

    /// Read `bit`.
    fn test(&self, bit: u64) -> Result<bool>;

    /// Toggle `bit`.
    fn flip(&self, bit: u64) -> Result<()>;

    /// Clear every bit.
    fn reset(&self);

    /// Returns `true` if the store addresses no bits.
    fn is_empty(&self) -> bool {
        self.width() == 0
    }
}
