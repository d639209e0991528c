//! Indented tree rendering of a trie.
use crate::trie::nodes::TrieNode;
use crate::trie::Trie;
use std::fmt::{self, Display};

impl Display for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root() else {
            return write!(f, "Trie {{ EMPTY }}");
        };

        fn fmt_node(f: &mut fmt::Formatter<'_>, node: &TrieNode, indent: usize) -> fmt::Result {
            write!(f, "{}", " ".repeat(indent))?;
            match node {
                TrieNode::Leaf(leaf) => {
                    write!(
                        f,
                        "Leaf {{ partial_key: {:?}, value: {}, dirty: {} }}",
                        leaf.partial_key.to_vec(),
                        leaf.value,
                        leaf.dirty,
                    )
                }
                TrieNode::Branch(branch) => {
                    write!(
                        f,
                        "Branch {{ partial_key: {:?}, value: {}, descendants: {}, dirty: {} }}",
                        branch.partial_key.to_vec(),
                        branch.value.as_ref().map_or("nil".to_string(), |value| value.to_string()),
                        branch.descendants,
                        branch.dirty,
                    )?;
                    for (index, child) in branch.children.iter().enumerate() {
                        if let Some(child) = child {
                            writeln!(f)?;
                            write!(f, "{}[{index:x}] ", " ".repeat(indent + 4))?;
                            fmt_node(f, child, 0)?;
                        }
                    }
                    Ok(())
                }
                TrieNode::Digest(reference) => {
                    write!(f, "Digest {{ {} }}", reference.digest)
                }
            }
        }

        fmt_node(f, root, 0)
    }
}
