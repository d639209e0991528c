#![allow(unused_crate_dependencies)]
//! Benchmark utilities: synthetic storage witnesses of configurable width.

use alloy_primitives::{Bytes, B256};
use substrate_trie::{merkle_value_root, BranchNode, LeafNode, Nibbles, TrieNode};

/// Shape of a generated witness.
#[derive(Debug)]
pub struct WitnessConfig {
    /// Number of storage entries in the trie, up to 256.
    pub entry_count: usize,
    /// Length of each stored value in bytes.
    pub value_len: usize,
}

/// A generated storage trie in proof form.
#[derive(Debug)]
pub struct GeneratedWitness {
    /// Encoded proof nodes covering every entry, root last.
    pub proof: Vec<Bytes>,
    /// Root hash of the generated trie.
    pub root_hash: B256,
    /// The `(key, value)` pairs stored in the trie.
    pub entries: Vec<(Vec<u8>, Bytes)>,
}

fn make_value(seed: usize, len: usize) -> Bytes {
    Bytes::from((0..len).map(|i| (i + seed) as u8).collect::<Vec<_>>())
}

/// Builds a two-level trie of `entry_count` leaves under keys
/// `[0xij, 0x12]` and returns it as an unordered proof. Nodes whose
/// encoding stays under 32 bytes are carried inline by their parent and
/// omitted from the proof.
pub fn generate_witness(config: &WitnessConfig) -> GeneratedWitness {
    assert!(config.entry_count <= 256, "the two-level layout holds at most 256 entries");

    let mut proof = Vec::new();
    let mut entries = Vec::with_capacity(config.entry_count);
    let mut root = BranchNode::new(Nibbles::default(), None);

    for high in 0..16 {
        let mut middle = BranchNode::new(Nibbles::default(), None);
        for low in 0..16 {
            let index = high * 16 + low;
            if index >= config.entry_count {
                break;
            }
            let value = make_value(index, config.value_len);
            let leaf = LeafNode::new(Nibbles::from_nibbles([0x1, 0x2]), value.clone());
            let encoding = leaf.encode();
            if encoding.len() >= 32 {
                proof.push(Bytes::from(encoding));
            }
            entries.push((vec![(high << 4 | low) as u8, 0x12], value));
            middle.insert_child(low, TrieNode::Leaf(leaf));
        }
        if middle.has_child() {
            let encoding = middle.encode();
            if encoding.len() >= 32 {
                proof.push(Bytes::from(encoding));
            }
            root.insert_child(high, TrieNode::Branch(middle));
        }
    }

    let root_encoding = Bytes::from(root.encode());
    let root_hash = merkle_value_root(&root_encoding);
    proof.push(root_encoding);

    GeneratedWitness { proof, root_hash, entries }
}
