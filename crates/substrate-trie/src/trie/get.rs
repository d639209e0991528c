//! Looking up a storage value along a nibble path.
use crate::trie::nodes::{BranchNode, LeafNode, TrieNode};
use alloy_primitives::Bytes;

impl LeafNode {
    fn get(&self, path: &[u8]) -> Option<&Bytes> {
        (self.partial_key.as_slice() == path).then_some(&self.value)
    }
}

impl BranchNode {
    fn get(&self, path: &[u8]) -> Option<&Bytes> {
        // Only reachable when the partial key is a prefix of the path.
        let partial_key = self.partial_key.as_slice();
        let remaining = path.strip_prefix(partial_key)?;
        let Some((&child_index, remaining)) = remaining.split_first() else {
            // The path ends here; a branch without a value has nothing
            // stored under its own key.
            return self.value.as_ref();
        };
        self.children.get(child_index as usize)?.get(remaining)
    }
}

impl TrieNode {
    pub(crate) fn get(&self, path: &[u8]) -> Option<&Bytes> {
        match self {
            TrieNode::Leaf(leaf) => leaf.get(path),
            TrieNode::Branch(branch) => branch.get(path),
            // The sub-tree behind a hash reference is not materialized, so
            // nothing along this path can be answered.
            TrieNode::Digest(_) => None,
        }
    }
}
