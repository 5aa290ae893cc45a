//! Merkle-DAG service layer for dagcask.
//!
//! Provides the [`Node`] abstraction for graph vertices that serialize to
//! content-addressed blocks, a thin [`DagService`] over a [`BlockStore`],
//! and the batched commit pipeline: [`Batch`] accumulates added nodes and
//! flushes them to the store in bounded-parallel bulk writes.
//!
//! [`BlockStore`]: dagcask_store::BlockStore

pub mod batch;
pub mod error;
pub mod node;
pub mod service;

pub use batch::{Batch, BatchConfig};
pub use error::{DagError, DagResult};
pub use node::{Node, RawNode};
pub use service::DagService;
