//! The [`Node`] abstraction: a graph vertex that serializes to block form.
//!
//! The commit pipeline never interprets a node's link structure or payload
//! encoding. It needs exactly two things from a vertex: its serialized
//! bytes and the content identifier derived from them.

use dagcask_types::{Block, BlockId};

/// A vertex in the Merkle DAG.
///
/// Implementors provide the node's serialized byte representation; the
/// content identifier and block form are derived from it. Types that cache
/// their id (or their block form) should override the defaults to avoid
/// re-hashing.
pub trait Node {
    /// The node's serialized byte representation.
    fn raw_data(&self) -> &[u8];

    /// The node's content-addressed identifier.
    fn id(&self) -> BlockId {
        BlockId::from_bytes(self.raw_data())
    }

    /// The node in block form, ready for storage.
    fn to_block(&self) -> Block {
        Block::from_parts(self.id(), self.raw_data().to_vec())
    }
}

/// A minimal leaf node: opaque bytes with a cached content id.
///
/// Useful for tests and for payloads that carry no links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawNode {
    block: Block,
}

impl RawNode {
    /// Create a raw node from its serialized bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            block: Block::new(data),
        }
    }
}

impl Node for RawNode {
    fn raw_data(&self) -> &[u8] {
        self.block.data()
    }

    fn id(&self) -> BlockId {
        self.block.id()
    }

    fn to_block(&self) -> Block {
        self.block.clone()
    }
}

impl Node for Block {
    fn raw_data(&self) -> &[u8] {
        self.data()
    }

    fn id(&self) -> BlockId {
        Block::id(self)
    }

    fn to_block(&self) -> Block {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_node_id_matches_content() {
        let node = RawNode::new(b"leaf payload".to_vec());
        assert_eq!(node.id(), BlockId::from_bytes(b"leaf payload"));
        assert_eq!(node.raw_data(), b"leaf payload");
    }

    #[test]
    fn raw_node_to_block_is_verified() {
        let node = RawNode::new(b"some bytes".to_vec());
        let block = node.to_block();
        assert_eq!(block.id(), node.id());
        assert!(block.verify());
    }

    #[test]
    fn block_implements_node() {
        let block = Block::new(b"already a block".to_vec());
        let node: &dyn Node = &block;
        assert_eq!(node.id(), block.id());
        assert_eq!(node.raw_data(), block.data());
        assert_eq!(node.to_block(), block);
    }

    #[test]
    fn default_id_derives_from_raw_data() {
        struct Plain(Vec<u8>);
        impl Node for Plain {
            fn raw_data(&self) -> &[u8] {
                &self.0
            }
        }

        let plain = Plain(b"derived".to_vec());
        assert_eq!(plain.id(), BlockId::from_bytes(b"derived"));
        let block = plain.to_block();
        assert!(block.verify());
    }
}
