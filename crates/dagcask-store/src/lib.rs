//! Content-addressed block storage for dagcask.
//!
//! This crate defines the persistent block store surface consumed by the
//! DAG and commit layers. Every block is an immutable blob identified by
//! its BLAKE3 hash.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlockStore`] trait:
//!
//! - [`InMemoryBlockStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Blocks are immutable once written (content-addressing guarantees this).
//! 2. Writes are idempotent: re-writing an existing block is a no-op.
//! 3. Concurrent reads are always safe (blocks are immutable).
//! 4. The store never interprets block contents -- it is a pure key-value store.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBlockStore;
pub use traits::BlockStore;
