#![no_main]

use alloy_primitives::Bytes;
use alloy_trie::Nibbles;
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use substrate_trie::{BranchNode, LeafNode, TrieNode};

#[derive(Debug, Arbitrary)]
struct LeafDesc {
    partial_key: Vec<u8>,
    value: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
struct BranchDesc {
    partial_key: Vec<u8>,
    value: Option<Vec<u8>>,
    children: [Option<LeafDesc>; 16],
}

#[derive(Debug, Arbitrary)]
enum NodeDesc {
    Leaf(LeafDesc),
    Branch(BranchDesc),
}

fn nibbles(raw: &[u8]) -> Nibbles {
    Nibbles::from_nibbles(raw.iter().map(|byte| byte & 0xf).collect::<Vec<_>>())
}

fn build_leaf(desc: &LeafDesc) -> LeafNode {
    LeafNode::new(nibbles(&desc.partial_key), Bytes::copy_from_slice(&desc.value))
}

fuzz_target!(|desc: NodeDesc| {
    let encoding = match &desc {
        NodeDesc::Leaf(leaf) => build_leaf(leaf).encode(),
        NodeDesc::Branch(branch) => {
            let mut node =
                BranchNode::new(nibbles(&branch.partial_key), branch.value.as_ref().map(|value| {
                    Bytes::copy_from_slice(value)
                }));
            for (index, child) in branch.children.iter().enumerate() {
                if let Some(child) = child {
                    node.insert_child(index, TrieNode::Leaf(build_leaf(child)));
                }
            }
            node.encode()
        }
    };

    // Every produced encoding decodes, and re-encoding it is bit-identical.
    let decoded = TrieNode::decode(&encoding).expect("own encodings always decode");
    let reencoded = match decoded {
        TrieNode::Leaf(leaf) => leaf.encode(),
        TrieNode::Branch(mut branch) => branch.encode(),
        TrieNode::Digest(_) => unreachable!("top-level decode never yields a digest"),
    };
    assert_eq!(reencoded, encoding, "encoding changed across a decode round-trip");
});
