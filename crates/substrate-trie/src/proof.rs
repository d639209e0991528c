//! Storage proof verification.
//!
//! A proof is an unordered collection of encoded trie nodes. The entry
//! hashing to the expected root hash becomes the root; every other entry is
//! indexed by its digest and materialized on demand while the root's hash
//! references are walked. References the proof does not cover are pruned,
//! so the rebuilt trie answers lookups exactly for the paths the proof
//! carries and reports not-found for everything else.
use crate::trie::{merkle_value_root, DecodeError, LeafNode, Trie, TrieNode};
use alloy_primitives::hex;
use alloy_primitives::map::B256Map;
use alloy_primitives::{Bytes, B256};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("proof is empty: for merkle root hash {root_hash}")]
    EmptyProof { root_hash: B256 },
    #[error("root node not found in proof: for root hash {root_hash} in proof hash digests {digests}")]
    RootNotFound { root_hash: B256, digests: String },
    #[error("decoding root node: {0}")]
    RootDecode(DecodeError),
    #[error("decoding child node for hash digest {digest}: {source}")]
    ChildDecode { digest: B256, source: DecodeError },
    #[error("key not found in proof trie: {key} for root hash {root_hash}")]
    KeyNotFound { key: String, root_hash: B256 },
    #[error("value found in proof trie does not match: expected value {expected} but got value {got}")]
    ValueMismatch { expected: String, got: String },
}

/// Verifies that `key` belongs to the trie with the given root hash, using
/// the encoded proof nodes. A non-empty `expected_value` must also match
/// the stored value; an empty one makes this an existence check.
pub fn verify(
    encoded_proof_nodes: &[Bytes],
    root_hash: B256,
    key: &[u8],
    expected_value: &[u8],
) -> Result<(), ProofError> {
    let trie = build_trie(encoded_proof_nodes, root_hash)?;
    let value = trie.get(key).ok_or_else(|| ProofError::KeyNotFound {
        key: bytes_to_string(key),
        root_hash,
    })?;
    if !expected_value.is_empty() && value.as_ref() != expected_value {
        return Err(ProofError::ValueMismatch {
            expected: bytes_to_string(expected_value),
            got: bytes_to_string(value),
        });
    }
    Ok(())
}

/// Rebuilds the partial trie carried by the encoded proof nodes, rooted at
/// the entry whose digest equals `root_hash`.
pub fn build_trie(encoded_proof_nodes: &[Bytes], root_hash: B256) -> Result<Trie, ProofError> {
    if encoded_proof_nodes.is_empty() {
        return Err(ProofError::EmptyProof { root_hash });
    }

    // One pass finds and decodes the root and indexes every other entry by
    // digest; entries are only decoded later if some materialized node
    // references them.
    let mut digest_to_encoding =
        B256Map::with_capacity_and_hasher(encoded_proof_nodes.len(), Default::default());
    let mut root: Option<TrieNode> = None;
    for encoding in encoded_proof_nodes {
        // Every proof entry is referenced by its hash digest, even a root
        // whose encoding is shorter than 32 bytes.
        let digest = merkle_value_root(encoding);
        if root.is_some() || digest != root_hash {
            digest_to_encoding.insert(digest, encoding.clone());
            continue;
        }
        let mut node = TrieNode::decode(encoding).map_err(ProofError::RootDecode)?;
        node.set_dirty();
        root = Some(node);
    }

    let Some(mut root) = root else {
        let mut digests: Vec<String> =
            digest_to_encoding.keys().map(ToString::to_string).collect();
        digests.sort();
        return Err(ProofError::RootNotFound { root_hash, digests: digests.join(", ") });
    };

    load_proof(&digest_to_encoding, &mut root)?;
    Ok(Trie::from_root(root))
}

/// Walks the children of `node`, substituting hash references with nodes
/// decoded from the digest index and pruning references the proof does not
/// cover. A well-formed proof may omit sub-trees irrelevant to the keys it
/// was generated for; a decode failure of an indexed entry is fatal.
fn load_proof(digest_to_encoding: &B256Map<Bytes>, node: &mut TrieNode) -> Result<(), ProofError> {
    let TrieNode::Branch(branch) = node else {
        return Ok(());
    };

    for index in 0..16 {
        let digest = match branch.children.get(index) {
            None => continue,
            Some(TrieNode::Digest(reference)) => reference.digest,
            Some(_) => {
                // An inline child decoded straight out of the parent
                // encoding carries its own value or children; it stays.
                if let Some(child) = branch.children.get_mut(index) {
                    child.set_dirty();
                }
                continue;
            }
        };

        match digest_to_encoding.get(&digest) {
            Some(encoding) => {
                let mut child = TrieNode::decode(encoding)
                    .map_err(|source| ProofError::ChildDecode { digest, source })?;
                child.set_dirty();
                // The reference already counted for one descendant.
                branch.descendants += child.descendants();
                load_proof(digest_to_encoding, &mut child)?;
                branch.children.insert(index, Box::new(child));
            }
            None => {
                // The proof does not cover this sub-tree: prune it.
                branch.children.remove(index);
                branch.descendants -= 1;
            }
        }
    }

    // A branch left childless collapses into a leaf when it holds a value
    // of its own.
    if !branch.has_child() {
        if let Some(value) = branch.value.take() {
            let mut leaf = LeafNode::new(std::mem::take(&mut branch.partial_key), value);
            leaf.dirty = branch.dirty;
            *node = TrieNode::Leaf(leaf);
        }
    }
    Ok(())
}

/// Renders bytes as bounded hex: short values in full, longer ones elided
/// to their first and last eight bytes.
fn bytes_to_string(bytes: &[u8]) -> String {
    if bytes.len() <= 20 {
        format!("0x{}", hex::encode(bytes))
    } else {
        format!(
            "0x{}...{}",
            hex::encode(&bytes[..8]),
            hex::encode(&bytes[bytes.len() - 8..])
        )
    }
}
