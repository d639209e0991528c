//! Node encoding and Merkle values.
//!
//! A node's Merkle value is its encoding when that is shorter than 32
//! bytes, and the BLAKE2b-256 digest of the encoding otherwise. Roots are
//! the exception: they are always referenced by digest, whatever the size
//! of their encoding. Computed Merkle values are cached on the node until
//! it is marked dirty.
use crate::trie::codec::{
    BRANCH_VARIANT, BRANCH_WITH_VALUE_VARIANT, LEAF_VARIANT, PARTIAL_KEY_LEN_MASK,
};
use crate::trie::nibbles::nibbles_to_key_le;
use crate::trie::nodes::{BranchNode, LeafNode, TrieNode};
use alloy_primitives::{b256, Bytes, B256};
use parity_scale_codec::{Compact, Encode};

/// Root hash of the empty trie: the BLAKE2b-256 digest of the empty node
/// encoding `0x00`.
pub const EMPTY_TRIE_HASH: B256 =
    b256!("03170a2e7597b7b7e3d84c05391d139a62b157e78786d8c082f29dcf4c111314");

/// BLAKE2b with a 256-bit digest, the hash function of the trie.
pub fn blake2b_256(data: &[u8]) -> B256 {
    let hash = blake2_rfc::blake2b::blake2b(32, &[], data);
    B256::from_slice(hash.as_bytes())
}

/// Merkle value of a root encoding. Roots are referenced by their digest
/// even when the encoding itself is shorter than 32 bytes.
pub fn merkle_value_root(encoding: &[u8]) -> B256 {
    blake2b_256(encoding)
}

fn merkle_value_of(encoding: Vec<u8>) -> Bytes {
    if encoding.len() < 32 {
        Bytes::from(encoding)
    } else {
        Bytes::copy_from_slice(blake2b_256(&encoding).as_slice())
    }
}

fn encode_header(variant: u8, nibble_count: usize, out: &mut Vec<u8>) {
    if nibble_count < PARTIAL_KEY_LEN_MASK as usize {
        out.push(variant | nibble_count as u8);
        return;
    }
    out.push(variant | PARTIAL_KEY_LEN_MASK);
    let mut remaining = nibble_count - PARTIAL_KEY_LEN_MASK as usize;
    while remaining >= 255 {
        out.push(255);
        remaining -= 255;
    }
    out.push(remaining as u8);
}

impl LeafNode {
    /// Returns the wire encoding of the leaf.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.partial_key.len() / 2 + self.value.len());
        encode_header(LEAF_VARIANT, self.partial_key.len(), &mut out);
        out.extend(nibbles_to_key_le(&self.partial_key));
        Compact(self.value.len() as u32).encode_to(&mut out);
        out.extend_from_slice(&self.value);
        out
    }

    fn merkle_value(&mut self) -> Bytes {
        if let Some(cached) = &self.merkle_value {
            return cached.clone();
        }
        let merkle_value = merkle_value_of(self.encode());
        self.merkle_value = Some(merkle_value.clone());
        merkle_value
    }
}

impl BranchNode {
    /// Returns the wire encoding of the branch: header, partial key,
    /// children bitmap, storage value if any, then the SCALE-wrapped
    /// Merkle value of each child in ascending slot order.
    pub fn encode(&mut self) -> Vec<u8> {
        let variant = if self.value.is_some() {
            BRANCH_WITH_VALUE_VARIANT
        } else {
            BRANCH_VARIANT
        };
        let mut out = Vec::with_capacity(8 + self.partial_key.len() / 2);
        encode_header(variant, self.partial_key.len(), &mut out);
        out.extend(nibbles_to_key_le(&self.partial_key));
        out.extend_from_slice(&self.children.bitmap().to_le_bytes());
        if let Some(value) = &self.value {
            Compact(value.len() as u32).encode_to(&mut out);
            out.extend_from_slice(value);
        }
        for child in self.children.iter_mut() {
            if let Some(child) = child {
                child.merkle_value().as_ref().encode_to(&mut out);
            }
        }
        out
    }

    fn merkle_value(&mut self) -> Bytes {
        if let Some(cached) = &self.merkle_value {
            return cached.clone();
        }
        let merkle_value = merkle_value_of(self.encode());
        self.merkle_value = Some(merkle_value.clone());
        merkle_value
    }
}

impl TrieNode {
    /// Merkle value of the node: its encoding when shorter than 32 bytes,
    /// the digest of the encoding otherwise. A hash reference already is
    /// its own Merkle value.
    pub fn merkle_value(&mut self) -> Bytes {
        match self {
            TrieNode::Leaf(leaf) => leaf.merkle_value(),
            TrieNode::Branch(branch) => branch.merkle_value(),
            TrieNode::Digest(reference) => Bytes::copy_from_slice(reference.digest.as_slice()),
        }
    }
}
