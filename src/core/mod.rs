//! Core types and traits for shardbit.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── addressing.rs - bit number -> (shard, byte, offset), shard geometry
//! ├── shard.rs      - one zeroed byte block
//! ├── bitvec.rs     - ShardedBitVec, the shard table
//! ├── store.rs      - BitStore / SharedBitStore access traits
//! └── mod.rs        - This file (public API)
//! ```
//!
//! # Access Models
//!
//! ## Exclusive (`BitStore`)
//! - Mutators take `&mut self`
//! - Zero synchronization overhead
//! - Implemented by [`ShardedBitVec`]
//! - Wrap in a lock of your choosing, or use [`crate::sync`]
//!
//! ## Shared (`SharedBitStore`)
//! - Mutators take `&self`
//! - Implemented by the lock wrappers in [`crate::sync`]
//! - Usage: `Arc<ShardLockedBitVec>`, no extra Mutex needed

pub mod addressing;
pub mod bitvec;
pub mod shard;
pub mod store;

pub use addressing::{BitAddress, ShardGeometry, SHARD_BITS};
pub use bitvec::{ShardLayout, ShardedBitVec};
pub use shard::Shard;
pub use store::{BitStore, SharedBitStore};
