//! A single fixed-capacity byte block.
//!
//! Shards know nothing about bit numbers; they operate on `(byte, offset)`
//! pairs produced by [`ShardGeometry::locate`](super::addressing::ShardGeometry::locate).
//! Every mutation touches exactly one byte.

use std::fmt;

/// Zero-initialised, fixed-length byte storage for one slice of the bit space.
#[derive(Clone, PartialEq, Eq)]
pub struct Shard {
    bytes: Box<[u8]>,
}

impl Shard {
    /// Allocate a shard of `len` zero bytes.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len].into_boxed_slice(),
        }
    }

    /// Length of the shard in bytes.
    #[must_use]
    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Raw view of the shard's bytes.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Set the bit at `(byte, offset)` to 1, leaving the rest of the byte intact.
    #[inline]
    pub fn set(&mut self, byte: usize, offset: u8) {
        self.bytes[byte] |= 1u8 << offset;
    }

    /// Clear the bit at `(byte, offset)` to 0.
    #[inline]
    pub fn clear(&mut self, byte: usize, offset: u8) {
        self.bytes[byte] &= !(1u8 << offset);
    }

    /// Read the bit at `(byte, offset)`.
    #[must_use]
    #[inline]
    pub fn test(&self, byte: usize, offset: u8) -> bool {
        (self.bytes[byte] >> offset) & 1 == 1
    }

    /// Toggle the bit at `(byte, offset)`.
    #[inline]
    pub fn flip(&mut self, byte: usize, offset: u8) {
        self.bytes[byte] ^= 1u8 << offset;
    }

    /// Overwrite a whole byte.
    #[inline]
    pub(crate) fn store_byte(&mut self, byte: usize, value: u8) {
        self.bytes[byte] = value;
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> u64 {
        self.bytes.iter().map(|b| u64::from(b.count_ones())).sum()
    }

    /// Zero every byte.
    pub fn reset(&mut self) {
        self.bytes.fill(0);
    }
}

// Full shards are 256 MiB; never dump their contents.
impl fmt::Debug for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shard")
            .field("len_bytes", &self.bytes.len())
            .finish()
    }
}
