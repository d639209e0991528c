//! The in-memory trie: node model, wire codec and lookup.
mod children;
mod codec;
mod display;
mod get;
mod hash;
mod nibbles;
mod nodes;
mod trie;

pub use children::BranchChildren;
pub use codec::DecodeError;
pub use hash::{blake2b_256, merkle_value_root, EMPTY_TRIE_HASH};
pub use nibbles::{key_to_nibbles, nibbles_to_key, nibbles_to_key_le};
pub use nodes::{BranchNode, DigestNode, LeafNode, NodeKind, TrieNode};

/// A trie reconstructed from proof nodes: either empty or a single owned
/// root node. Sub-trees the proof does not cover are absent, so lookups
/// answer only for the paths the proof carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trie {
    root: Option<TrieNode>,
}
