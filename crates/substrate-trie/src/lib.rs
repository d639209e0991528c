//! A sparse base-16 Merkle-Patricia trie for Substrate storage proofs.
//!
//! The trie follows the Substrate state layout V0: keys are addressed as
//! 4-bit nibbles, nodes are encoded with the Substrate node codec (SCALE
//! length prefixes, 16-bit children bitmap) and referenced by their Merkle
//! value, the BLAKE2b-256 digest of an encoding of 32 bytes or more, or the
//! encoding itself when shorter.
//!
//! Storage proofs are unordered collections of encoded nodes. [`proof`]
//! rebuilds the partial trie a proof carries, checks it against an expected
//! root hash and answers key lookups on it:
//!
//! ```
//! use substrate_trie::{merkle_value_root, proof, Bytes, LeafNode, Nibbles};
//!
//! let leaf = LeafNode::new(Nibbles::from_nibbles([0x0, 0x1]), Bytes::from(vec![4, 5, 6]));
//! let encoding = Bytes::from(leaf.encode());
//! let root_hash = merkle_value_root(&encoding);
//!
//! proof::verify(&[encoding], root_hash, &[0x01], &[4, 5, 6]).unwrap();
//! ```
mod trie;

pub mod proof;

pub use alloy_primitives::{Bytes, B256};
pub use alloy_trie::Nibbles;
pub use trie::{
    blake2b_256, key_to_nibbles, merkle_value_root, nibbles_to_key, nibbles_to_key_le,
    BranchChildren, BranchNode, DecodeError, DigestNode, LeafNode, NodeKind, Trie, TrieNode,
    EMPTY_TRIE_HASH,
};
