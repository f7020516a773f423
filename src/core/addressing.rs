//! Two-level addressing: bit number to `(shard, byte, offset)`.
//!
//! A logical bit space of `width` bits is cut into shards of `shard_bits`
//! bits each. Shard `i` covers `[i * shard_bits, (i + 1) * shard_bits)`.
//! Inside a shard, bits are packed eight per byte, least-significant bit
//! first:
//!
//! ```text
//! bit number b
//!   shard  = b / shard_bits
//!   within = b % shard_bits
//!   byte   = within / 8
//!   offset = within % 8        (0 = LSB)
//! ```
//!
//! The shard count is always derived from the full width with a ceiling
//! division. Modulo is only ever applied to find the position inside a
//! shard.
//!
//! # Examples
//!
//! ```
//! use shardbit::core::addressing::{ShardGeometry, SHARD_BITS};
//!
//! let geo = ShardGeometry::new(SHARD_BITS + 5, SHARD_BITS).unwrap();
//! assert_eq!(geo.shard_count(), 2);
//! assert_eq!(geo.shard_bytes(1), 1);
//!
//! let addr = geo.locate(SHARD_BITS).unwrap();
//! assert_eq!((addr.shard, addr.byte, addr.offset), (1, 0, 0));
//! ```

#![allow(clippy::cast_possible_truncation)]

use crate::error::{Result, ShardBitError};

/// Capacity of one shard in bits: the largest index a signed 32-bit integer
/// can hold.
///
/// Not a multiple of 8, so the last byte of a full shard carries 7 bits.
pub const SHARD_BITS: u64 = i32::MAX as u64;

/// Location of a single bit inside the shard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitAddress {
    /// Index of the shard holding the bit.
    pub shard: usize,
    /// Byte index within that shard.
    pub byte: usize,
    /// Bit position within that byte (0 = least significant).
    pub offset: u8,
}

impl BitAddress {
    /// Single-bit mask selecting this address within its byte.
    #[must_use]
    #[inline]
    pub const fn mask(&self) -> u8 {
        1u8 << self.offset
    }
}

/// Shape of a sharded bit vector: logical width and per-shard capacity.
///
/// Geometry is validated once in [`ShardGeometry::new`]; afterwards every
/// derived quantity (shard count, shard byte lengths) is known to fit in
/// `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardGeometry {
    width: u64,
    shard_bits: u64,
    shard_count: usize,
}

impl ShardGeometry {
    /// Validate and build a geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::InvalidWidth`] if `shard_bits` is zero, or if
    /// the resulting shard table or backing bytes could not be addressed on
    /// this platform.
    pub fn new(width: u64, shard_bits: u64) -> Result<Self> {
        if shard_bits == 0 {
            return Err(ShardBitError::invalid_width(
                width,
                "shard capacity must be at least one bit",
            ));
        }

        let shard_count = usize::try_from(width.div_ceil(shard_bits)).map_err(|_| {
            ShardBitError::invalid_width(width, "shard count exceeds the platform address space")
        })?;

        let full_bytes = shard_bits.min(width).div_ceil(8);
        if usize::try_from(full_bytes).is_err() {
            return Err(ShardBitError::invalid_width(
                width,
                "shard byte length exceeds the platform address space",
            ));
        }

        let geometry = Self {
            width,
            shard_bits,
            shard_count,
        };

        // Rust allocations are capped at isize::MAX bytes.
        match geometry.checked_total_bytes() {
            Some(total) if total <= isize::MAX as u64 => Ok(geometry),
            _ => Err(ShardBitError::invalid_width(
                width,
                "backing storage exceeds the platform address space",
            )),
        }
    }

    /// Logical width in bits.
    #[must_use]
    #[inline]
    pub const fn width(&self) -> u64 {
        self.width
    }

    /// Capacity of every shard except possibly the last, in bits.
    #[must_use]
    #[inline]
    pub const fn shard_bits(&self) -> u64 {
        self.shard_bits
    }

    /// Number of shards: `ceil(width / shard_bits)`.
    #[must_use]
    #[inline]
    pub const fn shard_count(&self) -> usize {
        self.shard_count
    }

    /// Number of bits covered by shard `idx`.
    ///
    /// Returns 0 for indices past the end of the table.
    #[must_use]
    pub fn bits_in_shard(&self, idx: usize) -> u64 {
        if idx >= self.shard_count {
            return 0;
        }
        let start = idx as u64 * self.shard_bits;
        self.shard_bits.min(self.width - start)
    }

    /// Byte length of shard `idx`: `ceil(min(shard_bits, width - idx * shard_bits) / 8)`.
    ///
    /// The final shard is not over-allocated when the width is not a multiple
    /// of the shard capacity.
    #[must_use]
    pub fn shard_bytes(&self, idx: usize) -> usize {
        // Fits: bounded by the full-shard byte length checked in `new`.
        self.bits_in_shard(idx).div_ceil(8) as usize
    }

    /// Total number of backing bytes across all shards.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.checked_total_bytes().unwrap_or(u64::MAX)
    }

    fn checked_total_bytes(&self) -> Option<u64> {
        if self.shard_count == 0 {
            return Some(0);
        }
        let full = self.shard_bits.div_ceil(8);
        let last = self.bits_in_shard(self.shard_count - 1).div_ceil(8);
        full.checked_mul(self.shard_count as u64 - 1)?
            .checked_add(last)
    }

    /// Map a bit number to its shard coordinates.
    ///
    /// Division and modulo are taken on the full 64-bit bit number.
    ///
    /// # Errors
    ///
    /// Returns [`ShardBitError::OutOfRange`] if `bit >= width`, or if the
    /// derived shard index is not inside the shard table.
    #[inline]
    pub fn locate(&self, bit: u64) -> Result<BitAddress> {
        if bit >= self.width {
            return Err(ShardBitError::out_of_range(bit, self.width));
        }

        let shard = bit / self.shard_bits;
        let within = bit % self.shard_bits;

        if shard >= self.shard_count as u64 {
            return Err(ShardBitError::out_of_range(bit, self.width));
        }

        Ok(BitAddress {
            shard: shard as usize,
            byte: (within / 8) as usize,
            offset: (within % 8) as u8,
        })
    }

    /// First bit number covered by shard `idx`.
    #[must_use]
    #[inline]
    pub fn shard_start(&self, idx: usize) -> u64 {
        idx as u64 * self.shard_bits
    }
}
