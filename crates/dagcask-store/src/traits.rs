use dagcask_types::{Block, BlockId};

use crate::error::StoreResult;

/// Content-addressed block store.
///
/// All implementations must satisfy these invariants:
/// - Blocks are immutable once written. Content-addressing guarantees this:
///   the same data always produces the same ID.
/// - Writes are idempotent: putting an already-present block is a no-op.
/// - Concurrent reads are always safe (blocks are immutable).
/// - The store never interprets block contents — it is a pure key-value store.
/// - All I/O errors are propagated, never silently ignored.
pub trait BlockStore: Send + Sync {
    /// Read a block by its content-addressed ID.
    ///
    /// Returns `Ok(None)` if the block does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    fn get(&self, id: &BlockId) -> StoreResult<Option<Block>>;

    /// Write a block and return its content-addressed ID.
    ///
    /// If the block already exists, this is a no-op (idempotent).
    fn put(&self, block: &Block) -> StoreResult<BlockId>;

    /// Check whether a block exists in the store.
    fn has(&self, id: &BlockId) -> StoreResult<bool>;

    /// Delete a block by ID. Returns `true` if the block existed.
    ///
    /// This is intended for garbage collection only. Deletion of
    /// referenced blocks can corrupt the DAG.
    fn delete(&self, id: &BlockId) -> StoreResult<bool>;

    /// Write a sequence of blocks and return their IDs.
    ///
    /// This is the bulk-write primitive the commit pipeline flushes
    /// through. It returns the first error encountered, or all IDs.
    /// Durability of the written blocks is the backend's concern.
    ///
    /// Default implementation calls `put()` for each block. Backends may
    /// override for better performance (e.g., one lock acquisition or a
    /// single fsync).
    fn put_many(&self, blocks: &[Block]) -> StoreResult<Vec<BlockId>> {
        blocks.iter().map(|block| self.put(block)).collect()
    }

    /// Read multiple blocks in a batch.
    ///
    /// Default implementation calls `get()` for each ID. Backends may
    /// override for better performance (e.g., fewer I/O round-trips).
    fn get_many(&self, ids: &[BlockId]) -> StoreResult<Vec<Option<Block>>> {
        ids.iter().map(|id| self.get(id)).collect()
    }
}
