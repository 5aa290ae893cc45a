use dagcask_types::BlockId;

/// Errors from block store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested block was not found.
    #[error("block not found: {0}")]
    NotFound(BlockId),

    /// Content hash mismatch on read or write (data corruption).
    #[error("hash mismatch for {id}: expected {expected}, computed {computed}")]
    HashMismatch {
        id: BlockId,
        expected: String,
        computed: String,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage-engine failure, surfaced verbatim.
    #[error("backend error: {0}")]
    Backend(String),

    /// Attempted to write a block with a null ID.
    #[error("cannot store block with null ID")]
    NullBlockId,

    /// Storage backend is read-only or otherwise unavailable.
    #[error("store is read-only")]
    ReadOnly,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
