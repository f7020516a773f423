//! Error types for shardbit operations.
//!
//! Only two things can go wrong: asking for a width the shard layout cannot
//! represent, and addressing a bit outside `[0, width)`. Both are local and
//! deterministic, so neither is ever retried or swallowed.
//!
//! # Error Propagation
//!
//! ```
//! use shardbit::{Result, ShardedBitVec};
//!
//! fn mark(bits: &[u64]) -> Result<ShardedBitVec> {
//!     let mut bv = ShardedBitVec::new(128)?;
//!     for &b in bits {
//!         bv.set(b)?;
//!     }
//!     Ok(bv)
//! }
//! # assert!(mark(&[1, 2, 3]).is_ok());
//! # assert!(mark(&[500]).is_err());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for shardbit operations.
pub type Result<T> = std::result::Result<T, ShardBitError>;

/// Errors that can occur while building or addressing a sharded bit vector.
///
/// `Clone` + `PartialEq` so tests can compare errors directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShardBitError {
    /// The requested logical width (or shard geometry) cannot be represented.
    ///
    /// Raised at construction for negative widths, a zero shard capacity, or
    /// a layout whose shard table would not fit the platform's address space.
    InvalidWidth {
        /// The width as the caller supplied it.
        requested: String,
        /// Why the width was rejected.
        reason: String,
    },

    /// A bit number fell outside `[0, width)`.
    OutOfRange {
        /// The bit number that was addressed.
        bit: u64,
        /// Logical width of the vector.
        width: u64,
    },
}

impl fmt::Display for ShardBitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth { requested, reason } => {
                write!(f, "Invalid bit vector width {}: {}.", requested, reason)
            }
            Self::OutOfRange { bit, width } => {
                write!(
                    f,
                    "Bit {} out of range for bit vector of width {}",
                    bit, width
                )
            }
        }
    }
}

impl std::error::Error for ShardBitError {}

impl ShardBitError {
    /// Create an `InvalidWidth` error.
    ///
    /// # Examples
    /// ```
    /// use shardbit::ShardBitError;
    ///
    /// let err = ShardBitError::invalid_width(-1, "width must not be negative");
    /// assert!(err.to_string().contains("-1"));
    /// ```
    #[must_use]
    pub fn invalid_width(requested: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidWidth {
            requested: requested.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an `OutOfRange` error.
    #[must_use]
    pub fn out_of_range(bit: u64, width: u64) -> Self {
        Self::OutOfRange { bit, width }
    }

    /// Returns `true` for addressing errors raised by accessors.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
