use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Content-addressed identifier for a block.
///
/// A `BlockId` is the BLAKE3 hash of a block's bytes. Identical content
/// always produces the same `BlockId`, making blocks deduplicatable and
/// verifiable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId([u8; 32]);

impl BlockId {
    /// Compute a `BlockId` from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create a `BlockId` from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The null block ID (all zeros). Represents "no block".
    pub const fn null() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` if this is the null block ID.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.short_hex())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for BlockId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<BlockId> for [u8; 32] {
    fn from(id: BlockId) -> Self {
        id.0
    }
}

/// An immutable, content-addressed byte blob.
///
/// A `Block` pairs an opaque payload with the `BlockId` derived from it. The
/// id is computed once at construction; callers providing a pre-computed id
/// via [`from_parts`] are responsible for its correctness and can check it
/// with [`verify`].
///
/// The rest of the system never interprets a block's payload. Only its
/// length and identifier are meaningful to the storage and commit layers.
///
/// [`from_parts`]: Block::from_parts
/// [`verify`]: Block::verify
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    data: Vec<u8>,
}

impl Block {
    /// Create a block from raw bytes, deriving its id.
    pub fn new(data: Vec<u8>) -> Self {
        let id = BlockId::from_bytes(&data);
        Self { id, data }
    }

    /// Assemble a block from a pre-computed id and its bytes.
    pub fn from_parts(id: BlockId, data: Vec<u8>) -> Self {
        Self { id, data }
    }

    /// The block's content-addressed identifier.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The raw payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Recompute the id from the payload and compare it to the stored id.
    pub fn verify(&self) -> bool {
        BlockId::from_bytes(&self.data) == self.id
    }

    /// Consume the block, returning its payload.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
