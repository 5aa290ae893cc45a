//! Batched, concurrency-bounded commit pipeline.
//!
//! A [`Batch`] accumulates nodes added by a single producer and flushes
//! them to the block store in bulk, in the background, with a bound on the
//! number of flushes in flight. The first flush failure is latched and
//! permanently closes the batch; durability of any added node is only
//! guaranteed once [`commit`] returns `Ok`.
//!
//! [`commit`]: Batch::commit

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use dagcask_store::{BlockStore, StoreError};
use dagcask_types::{Block, BlockId};

use crate::error::{DagError, DagResult};
use crate::node::Node;

/// Default flush window byte threshold (8 MiB).
pub const DEFAULT_MAX_BYTES: usize = 8 << 20;

/// Default flush window block-count threshold.
pub const DEFAULT_MAX_BLOCKS: usize = 128;

/// Configuration for a [`Batch`].
///
/// The thresholds are strict: a window is dispatched when its byte total
/// exceeds `max_bytes` or its block count exceeds `max_blocks`. A threshold
/// of zero therefore does not disable that axis -- it makes every add
/// exceed it, dispatching a one-block flush per add. To effectively disable
/// an axis, set it to `usize::MAX`.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Byte-size threshold of one flush window.
    pub max_bytes: usize,
    /// Block-count threshold of one flush window.
    pub max_blocks: usize,
    /// Upper bound on flushes in flight. Values below 1 are clamped to 1.
    pub max_parallel: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_blocks: DEFAULT_MAX_BLOCKS,
            max_parallel: default_parallelism(),
        }
    }
}

/// Twice the available execution units, the default in-flight flush bound.
fn default_parallelism() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1) * 2
}

/// A buffer for batching node adds into bounded-parallel bulk writes.
///
/// Designed for a single producer: one caller drives [`add`] and
/// [`commit`]; the only internal concurrency is the batch's own background
/// flushes. Dropping a batch without committing abandons any unflushed
/// window -- that data is silently lost, by contract.
///
/// Error semantics are all-or-nothing at batch granularity: after any
/// flush failure the batch may be partially persisted, but the caller must
/// treat it as failed and its returned ids as unverified. No retries are
/// attempted internally.
///
/// [`add`]: Batch::add
/// [`commit`]: Batch::commit
pub struct Batch {
    store: Arc<dyn BlockStore>,
    config: BatchConfig,

    /// Current unflushed window, in add order.
    pending: Vec<Block>,
    pending_bytes: usize,

    /// Flushes dispatched but not yet accounted for.
    in_flight: usize,
    /// First flush failure; write-once, never cleared.
    latched: Option<Arc<StoreError>>,

    /// Each flush reports exactly one outcome through this channel.
    completion_tx: SyncSender<Result<(), StoreError>>,
    completion_rx: Receiver<Result<(), StoreError>>,
}

impl Batch {
    /// Create a batch writing through the given store.
    pub fn new(store: Arc<dyn BlockStore>, config: BatchConfig) -> Self {
        let mut config = config;
        config.max_parallel = config.max_parallel.max(1);
        // Capacity max_parallel: flush threads never block on reporting.
        let (completion_tx, completion_rx) = mpsc::sync_channel(config.max_parallel);
        Self {
            store,
            config,
            pending: Vec::new(),
            pending_bytes: 0,
            in_flight: 0,
            latched: None,
            completion_tx,
            completion_rx,
        }
    }

    /// Add a node to the batch, dispatching a flush if a window threshold
    /// is exceeded.
    ///
    /// Returns the node's content identifier. An `Ok` here does not imply
    /// durability; only a later successful [`commit`](Batch::commit) does.
    /// Once a flush failure has been latched, `add` returns that error and
    /// buffers nothing.
    ///
    /// Blocks only when a dispatch is triggered while the in-flight bound
    /// is already reached, until one outstanding flush completes.
    pub fn add<N: Node + ?Sized>(&mut self, node: &N) -> DagResult<BlockId> {
        // Catch already-completed flushes early so a failure surfaces
        // before more work is buffered.
        self.drain_ready();
        if let Some(err) = &self.latched {
            return Err(DagError::FlushFailed(Arc::clone(err)));
        }

        let block = node.to_block();
        let id = block.id();
        self.pending_bytes += block.len();
        self.pending.push(block);

        if self.pending_bytes > self.config.max_bytes
            || self.pending.len() > self.config.max_blocks
        {
            self.dispatch();
            // The slot wait inside dispatch can observe a failed flush.
            if let Some(err) = &self.latched {
                return Err(DagError::FlushFailed(Arc::clone(err)));
            }
        }

        Ok(id)
    }

    /// Flush the remaining window and wait for every outstanding flush.
    ///
    /// Returns the first error encountered across all flushes this batch
    /// ever issued, or `Ok` if all succeeded. Idempotent: repeated calls
    /// after success are no-ops, and repeated calls after failure
    /// re-return the latched error without issuing new work.
    pub fn commit(&mut self) -> DagResult<()> {
        self.dispatch();
        while self.in_flight > 0 && self.latched.is_none() {
            match self.completion_rx.recv() {
                Ok(outcome) => {
                    self.in_flight -= 1;
                    if let Err(err) = outcome {
                        self.latch(err);
                    }
                }
                // Cannot disconnect: we hold a sender.
                Err(_) => break,
            }
        }

        match &self.latched {
            Some(err) => Err(DagError::FlushFailed(Arc::clone(err))),
            None => Ok(()),
        }
    }

    /// Number of blocks in the current unflushed window.
    pub fn pending_blocks(&self) -> usize {
        self.pending.len()
    }

    /// Byte total of the current unflushed window.
    pub fn pending_bytes(&self) -> usize {
        self.pending_bytes
    }

    /// Number of flushes dispatched but not yet accounted for.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns `true` once a flush failure has been latched. A closed
    /// batch accepts no further work.
    pub fn is_closed(&self) -> bool {
        self.latched.is_some()
    }

    /// Drain whatever completion notifications are immediately available.
    ///
    /// Best-effort accounting refresh, never blocks. Stops early once an
    /// error is latched.
    fn drain_ready(&mut self) {
        while self.in_flight > 0 && self.latched.is_none() {
            match self.completion_rx.try_recv() {
                Ok(outcome) => {
                    self.in_flight -= 1;
                    if let Err(err) = outcome {
                        self.latch(err);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
            }
        }
    }

    /// Dispatch the current window as one background bulk write.
    ///
    /// No-op if the window is empty or the batch is closed. If the
    /// in-flight bound is reached, blocks until one outstanding flush
    /// completes; a failure observed there latches and aborts the
    /// dispatch. The window is cleared immediately on dispatch, so
    /// subsequent adds accumulate concurrently with the flush.
    fn dispatch(&mut self) {
        if self.pending.is_empty() || self.latched.is_some() {
            return;
        }

        if self.in_flight >= self.config.max_parallel {
            // Backpressure: wait for one slot to free up.
            match self.completion_rx.recv() {
                Ok(outcome) => {
                    self.in_flight -= 1;
                    if let Err(err) = outcome {
                        self.latch(err);
                        return;
                    }
                }
                // Cannot disconnect: we hold a sender.
                Err(_) => return,
            }
        }

        let count = self.pending.len();
        let bytes = self.pending_bytes;
        let blocks = std::mem::replace(&mut self.pending, Vec::with_capacity(count));
        self.pending_bytes = 0;

        let store = Arc::clone(&self.store);
        let completion_tx = self.completion_tx.clone();
        thread::spawn(move || {
            let outcome = store.put_many(&blocks).map(|_| ());
            // A failed send means the batch was dropped; abandonment
            // discards outcomes by contract.
            let _ = completion_tx.send(outcome);
        });
        self.in_flight += 1;

        debug!(blocks = count, bytes, in_flight = self.in_flight, "dispatched flush");
    }

    /// Latch the first flush failure; later failures are accounting only.
    fn latch(&mut self, err: StoreError) {
        if self.latched.is_none() {
            self.latched = Some(Arc::new(err));
        }
    }
}

impl std::fmt::Debug for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch")
            .field("pending_blocks", &self.pending.len())
            .field("pending_bytes", &self.pending_bytes)
            .field("in_flight", &self.in_flight)
            .field("closed", &self.latched.is_some())
            .finish()
    }
}

impl Drop for Batch {
    fn drop(&mut self) {
        if !self.pending.is_empty() || self.in_flight > 0 {
            debug!(
                pending = self.pending.len(),
                in_flight = self.in_flight,
                "batch dropped without commit"
            );
        }
    }
}
