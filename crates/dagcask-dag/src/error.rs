//! Error types for the DAG service and commit pipeline.

use std::sync::Arc;

use dagcask_store::StoreError;

/// Errors that can occur during DAG operations.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// A bulk write issued by a batch failed. The batch latches the first
    /// such failure and re-returns it for every subsequent operation; the
    /// originating store error is preserved verbatim.
    #[error("flush failed: {0}")]
    FlushFailed(Arc<StoreError>),

    /// A single-block store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience alias for DAG results.
pub type DagResult<T> = Result<T, DagError>;
