//! Trie-level operations.
use crate::trie::hash::{merkle_value_root, EMPTY_TRIE_HASH};
use crate::trie::nibbles::key_to_nibbles;
use crate::trie::nodes::TrieNode;
use crate::trie::Trie;
use alloy_primitives::{Bytes, B256};

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Wraps a node as the root of a trie.
    pub fn from_root(root: TrieNode) -> Self {
        Self { root: Some(root) }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&TrieNode> {
        self.root.as_ref()
    }

    /// Looks up the value stored under `key`, walking the key's nibbles
    /// from the root. Paths leading into sub-trees that are not
    /// materialized answer `None`.
    pub fn get(&self, key: &[u8]) -> Option<&Bytes> {
        let path = key_to_nibbles(key);
        self.root.as_ref()?.get(path.as_slice())
    }

    /// Root hash of the trie: the BLAKE2b-256 digest of the root encoding,
    /// whatever its size, or the canonical empty-trie hash.
    pub fn hash(&mut self) -> B256 {
        match self.root.as_mut() {
            None => EMPTY_TRIE_HASH,
            Some(TrieNode::Leaf(leaf)) => merkle_value_root(&leaf.encode()),
            Some(TrieNode::Branch(branch)) => merkle_value_root(&branch.encode()),
            // A root known only by its hash is that hash.
            Some(TrieNode::Digest(reference)) => reference.digest,
        }
    }
}
