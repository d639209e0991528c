//! The three node variants building the trie.
//!
//! The layout has no extension nodes: branches carry their own partial key.
//! A child slot referencing a sub-tree only by hash holds a `Digest`
//! variant instead of a partially populated node.
use crate::trie::children::BranchChildren;
use alloy_primitives::{Bytes, B256};
use alloy_trie::Nibbles;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    pub partial_key: Nibbles,
    /// Storage value. May be empty, which is distinct from no value at all.
    pub value: Bytes,
    /// True when the cached Merkle value no longer reflects the node state.
    pub dirty: bool,
    /// Cached Merkle value: the node encoding when shorter than 32 bytes,
    /// its BLAKE2b-256 digest otherwise.
    pub merkle_value: Option<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNode {
    pub partial_key: Nibbles,
    /// Optional storage value. `Some` with an empty payload is a present
    /// empty value and is not the same as `None`.
    pub value: Option<Bytes>,
    pub children: BranchChildren,
    /// Count of transitively reachable children.
    pub descendants: u32,
    pub dirty: bool,
    pub merkle_value: Option<Bytes>,
}

/// A 32-byte hash standing in for a sub-tree that has not been
/// materialized from its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestNode {
    pub digest: B256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieNode {
    Leaf(LeafNode),
    Branch(BranchNode),
    Digest(DigestNode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Branch,
    Digest,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf => f.write_str("leaf"),
            NodeKind::Branch => f.write_str("branch"),
            NodeKind::Digest => f.write_str("digest"),
        }
    }
}

impl LeafNode {
    pub fn new(partial_key: Nibbles, value: Bytes) -> Self {
        Self { partial_key, value, dirty: false, merkle_value: None }
    }
}

impl BranchNode {
    pub fn new(partial_key: Nibbles, value: Option<Bytes>) -> Self {
        Self {
            partial_key,
            value,
            children: BranchChildren::new(),
            descendants: 0,
            dirty: false,
            merkle_value: None,
        }
    }

    /// Puts `node` into child slot `index`, keeping the descendant count in
    /// step.
    pub fn insert_child(&mut self, index: usize, node: TrieNode) {
        self.descendants += 1 + node.descendants();
        self.children.insert(index, Box::new(node));
    }

    pub fn has_child(&self) -> bool {
        !self.children.is_empty()
    }
}

impl TrieNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            TrieNode::Leaf(_) => NodeKind::Leaf,
            TrieNode::Branch(_) => NodeKind::Branch,
            TrieNode::Digest(_) => NodeKind::Digest,
        }
    }

    pub fn has_child(&self) -> bool {
        match self {
            TrieNode::Branch(branch) => branch.has_child(),
            TrieNode::Leaf(_) | TrieNode::Digest(_) => false,
        }
    }

    pub fn descendants(&self) -> u32 {
        match self {
            TrieNode::Branch(branch) => branch.descendants,
            TrieNode::Leaf(_) | TrieNode::Digest(_) => 0,
        }
    }

    pub fn storage_value(&self) -> Option<&Bytes> {
        match self {
            TrieNode::Leaf(leaf) => Some(&leaf.value),
            TrieNode::Branch(branch) => branch.value.as_ref(),
            TrieNode::Digest(_) => None,
        }
    }

    /// Compares the storage value with `value`, keeping the distinction
    /// between an absent value and a present empty one.
    pub fn storage_value_equal(&self, value: Option<&[u8]>) -> bool {
        match (self.storage_value(), value) {
            (None, None) => true,
            (Some(own), Some(other)) => own.as_ref() == other,
            _ => false,
        }
    }

    /// Marks the node dirty and drops the cached Merkle value.
    pub fn set_dirty(&mut self) {
        match self {
            TrieNode::Leaf(leaf) => {
                leaf.dirty = true;
                leaf.merkle_value = None;
            }
            TrieNode::Branch(branch) => {
                branch.dirty = true;
                branch.merkle_value = None;
            }
            TrieNode::Digest(_) => {}
        }
    }

    /// Clears the dirty flag. The cached Merkle value is left intact; it is
    /// trusted again from here on.
    pub fn set_clean(&mut self) {
        match self {
            TrieNode::Leaf(leaf) => leaf.dirty = false,
            TrieNode::Branch(branch) => branch.dirty = false,
            TrieNode::Digest(_) => {}
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            TrieNode::Leaf(leaf) => leaf.dirty,
            TrieNode::Branch(branch) => branch.dirty,
            TrieNode::Digest(_) => false,
        }
    }
}

impl From<LeafNode> for TrieNode {
    fn from(leaf: LeafNode) -> Self {
        TrieNode::Leaf(leaf)
    }
}

impl From<BranchNode> for TrieNode {
    fn from(branch: BranchNode) -> Self {
        TrieNode::Branch(branch)
    }
}

impl From<DigestNode> for TrieNode {
    fn from(digest: DigestNode) -> Self {
        TrieNode::Digest(digest)
    }
}
