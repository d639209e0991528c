#![no_main]

use libfuzzer_sys::fuzz_target;
use substrate_trie::TrieNode;

// Decoding arbitrary bytes must fail cleanly, never panic.
fuzz_target!(|data: &[u8]| {
    let _ = TrieNode::decode(data);
});
