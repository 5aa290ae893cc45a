use std::collections::HashMap;
use std::sync::RwLock;

use dagcask_types::{Block, BlockId};

use crate::error::{StoreError, StoreResult};
use crate::traits::BlockStore;

/// In-memory, HashMap-based block store.
///
/// Intended for tests and embedding. All blocks are held in memory behind a
/// `RwLock` for safe concurrent access. Blocks are cloned on read/write.
pub struct InMemoryBlockStore {
    blocks: RwLock<HashMap<BlockId, Block>>,
}

impl InMemoryBlockStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blocks currently stored.
    pub fn len(&self) -> usize {
        self.blocks.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blocks.
    pub fn total_bytes(&self) -> u64 {
        self.blocks
            .read()
            .expect("lock poisoned")
            .values()
            .map(|block| block.len() as u64)
            .sum()
    }

    /// Remove all blocks from the store.
    pub fn clear(&self) {
        self.blocks.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all block IDs in the store.
    pub fn all_ids(&self) -> Vec<BlockId> {
        let map = self.blocks.read().expect("lock poisoned");
        let mut ids: Vec<BlockId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStore for InMemoryBlockStore {
    fn get(&self, id: &BlockId) -> StoreResult<Option<Block>> {
        let map = self.blocks.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn put(&self, block: &Block) -> StoreResult<BlockId> {
        let id = block.id();
        if id.is_null() {
            return Err(StoreError::NullBlockId);
        }
        let mut map = self.blocks.write().expect("lock poisoned");
        // Idempotent: if already present, skip (content-addressing guarantees
        // the same ID always maps to the same content).
        map.entry(id).or_insert_with(|| block.clone());
        Ok(id)
    }

    fn has(&self, id: &BlockId) -> StoreResult<bool> {
        let map = self.blocks.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }

    fn delete(&self, id: &BlockId) -> StoreResult<bool> {
        let mut map = self.blocks.write().expect("lock poisoned");
        Ok(map.remove(id).is_some())
    }

    fn put_many(&self, blocks: &[Block]) -> StoreResult<Vec<BlockId>> {
        // One write-lock acquisition for the whole batch.
        let mut map = self.blocks.write().expect("lock poisoned");
        let mut ids = Vec::with_capacity(blocks.len());
        for block in blocks {
            let id = block.id();
            if id.is_null() {
                return Err(StoreError::NullBlockId);
            }
            map.entry(id).or_insert_with(|| block.clone());
            ids.push(id);
        }
        Ok(ids)
    }
}

impl std::fmt::Debug for InMemoryBlockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryBlockStore")
            .field("block_count", &count)
            .finish()
    }
}
