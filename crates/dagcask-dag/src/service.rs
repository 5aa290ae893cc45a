//! Thin DAG service over a block store.

use std::sync::Arc;

use dagcask_store::BlockStore;
use dagcask_types::{Block, BlockId};

use crate::batch::{Batch, BatchConfig};
use crate::error::DagResult;
use crate::node::Node;

/// DAG service: adds and retrieves nodes through a [`BlockStore`].
///
/// For bulk ingestion (e.g., a file importer producing many nodes), use
/// [`batch`] instead of repeated [`add`] calls -- a [`Batch`] groups nodes
/// into bulk writes and overlaps them.
///
/// [`add`]: DagService::add
/// [`batch`]: DagService::batch
#[derive(Clone)]
pub struct DagService {
    store: Arc<dyn BlockStore>,
}

impl DagService {
    /// Create a service backed by the given store.
    pub fn new(store: Arc<dyn BlockStore>) -> Self {
        Self { store }
    }

    /// The underlying block store.
    pub fn store(&self) -> &Arc<dyn BlockStore> {
        &self.store
    }

    /// Persist a single node, returning its content identifier.
    pub fn add<N: Node + ?Sized>(&self, node: &N) -> DagResult<BlockId> {
        Ok(self.store.put(&node.to_block())?)
    }

    /// Retrieve a node's block form by content identifier.
    ///
    /// Returns `Ok(None)` if the block is not present.
    pub fn get(&self, id: &BlockId) -> DagResult<Option<Block>> {
        Ok(self.store.get(id)?)
    }

    /// Start a batch with default thresholds.
    pub fn batch(&self) -> Batch {
        self.batch_with_config(BatchConfig::default())
    }

    /// Start a batch with explicit thresholds.
    pub fn batch_with_config(&self, config: BatchConfig) -> Batch {
        Batch::new(Arc::clone(&self.store), config)
    }
}

impl std::fmt::Debug for DagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DagService").finish_non_exhaustive()
    }
}
