//! Foundation types for dagcask.
//!
//! This crate provides the content-addressing primitives used throughout the
//! dagcask node. Every other dagcask crate depends on `dagcask-types`.
//!
//! # Key Types
//!
//! - [`BlockId`] — Content-addressed identifier (BLAKE3 hash of a block's bytes)
//! - [`Block`] — Immutable byte blob paired with its derived identifier

pub mod block;
pub mod error;

pub use block::{Block, BlockId};
pub use error::TypeError;
