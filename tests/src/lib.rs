#![allow(missing_docs)]

#[cfg(test)]
mod tests {
    use alloy_primitives::{b256, hex, Bytes};
    use substrate_trie::proof::{build_trie, verify, ProofError};
    use substrate_trie::{merkle_value_root, LeafNode, Nibbles, TrieNode};

    /// Storage key of `timestamp.now`, the same on every chain below.
    const TIMESTAMP_KEY: [u8; 32] =
        hex!("f0c365c3cf59d671eb72da0e7a4113c49f1f0515f462cdcf84e0f1d6045dfcbb");

    fn proof_nodes(encodings: &[&str]) -> Vec<Bytes> {
        encodings.iter().map(|encoding| Bytes::from(hex::decode(encoding).unwrap())).collect()
    }

    /// Composable parachain storage proof: a three-level descent where the
    /// proof entries arrive with the root in first position.
    #[test]
    fn composable_timestamp_proof() {
        let root_hash =
            b256!("dc4887669c2a6b3462e9557aa3105a66a02b6ec3b21784613de78c95dc3cbbe0");
        let proof = proof_nodes(&[
            "80fffd8028b54b9a0a90d41b7941c43e6a0597d5914e3b62bdcb244851b9fc806c28ea2480d5ba6d50586692888b0c2f5b3c3fc345eb3a2405996f025ed37982ca396f5ed580bd281c12f20f06077bffd56b2f8b6431ee6c9fd11fed9c22db86cea849aeff2280afa1e1b5ce72ea1675e5e69be85e98fbfb660691a76fee9229f758a75315f2bc80aafc60caa3519d4b861e6b8da226266a15060e2071bba4184e194da61dfb208e809d3f6ae8f655009551de95ae1ef863f6771522fd5c0475a50ff53c5c8169b5888024a760a8f6c27928ae9e2fed9968bc5f6e17c3ae647398d8a615e5b2bb4b425f8085a0da830399f25fca4b653de654ffd3c92be39f3ae4f54e7c504961b5bd00cf80c2d44d371e5fc1f50227d7491ad65ad049630361cefb4ab1844831237609f08380c644938921d14ae611f3a90991af8b7f5bdb8fa361ee2c646c849bca90f491e6806e729ad43a591cd1321762582782bbe4ed193c6f583ec76013126f7f786e376280509bb016f2887d12137e73d26d7ddcd7f9c8ff458147cb9d309494655fe68de180009f8697d760fbe020564b07f407e6aad58ba9451b3d2d88b3ee03e12db7c47480952dcc0804e1120508a1753f1de4aa5b7481026a3320df8b48e918f0cecbaed3803360bf948fddc403d345064082e8393d7a1aad7a19081f6d02d94358f242b86c",
            "9ec365c3cf59d671eb72da0e7a4113c41002505f0e7b9012096b41c4eb3aaf947f6ea429080000685f0f1f0515f462cdcf84e0f1d6045dfcbb20865c4a2b7f010000",
            "8005088076c66e2871b4fe037d112ebffb3bfc8bd83a4ec26047f58ee2df7be4e9ebe3d680c1638f702aaa71e4b78cc8538ecae03e827bb494cc54279606b201ec071a5e24806d2a1e6d5236e1e13c5a5c84831f5f5383f97eba32df6f9faf80e32cf2f129bc",
        ]);

        let trie = build_trie(&proof, root_hash).unwrap();
        let timestamp = trie.get(&TIMESTAMP_KEY).unwrap();
        assert_eq!(timestamp.as_ref(), hex!("865c4a2b7f010000"));

        verify(&proof, root_hash, &TIMESTAMP_KEY, &hex!("865c4a2b7f010000")).unwrap();
        verify(&proof, root_hash, &TIMESTAMP_KEY, &[]).unwrap();
    }

    /// Composable parachain proof for block 4900: here the root entry is
    /// not the first proof node, exercising order independence on real
    /// data.
    #[test]
    fn composable_block_4900_proof_with_unordered_entries() {
        let root_hash =
            b256!("171ede47def80f78d8859c10fc55154b600fd166b001bb6bf8765c1df62530d3");
        let proof = proof_nodes(&[
            "808500801b987dbf9f24ce9ce1001e97d33dcfc79920999c37d3ae6b0634497a78da9ced80c1638f702aaa71e4b78cc8538ecae03e827bb494cc54279606b201ec071a5e248084baf221c83784fbee58c383af751a9486978506539c106b37de9d19e62c5130",
            "80ffff8079b6da046c52378a7ba543b5aa141132887428d9adb17d6472011bf4dc8b0a6d80e7ff3f3a8e268349e6feda156d37e76cd011d686f2d04a26bc929faa6b2de68180328d5d55e894aaa8f41735e7a50cce4311565360c596434084f0c8eeb3fbccd580129ff9c4b5740be6b89acdd2dbab3068d5ed42de0a9d78c7aaffff3ecdb52f8d80ee067afaa95d3c8c993586f5ea9607787a037282c8ecc514d5fa0bece67b72928080ef946582b044f23c866c7d48820c383bed0f852e48c813546f4afc97a576b380a437b79067b6b4c40bf4e68e949db74c5030b37f6b3ac92c317551674999c48780a9efe6a803b77fbb7775bfd2199dd568bf3ca792b3cdca82429a5d1873fb329380c9bfdb058843f0432f8b913f4f265234eb1be4df26b1ca778baccea03094fe4d8061ef1e2eb9a4591dcb776a01bd6e4d542028d618bff8d170280c11b695a19ca28073a4d9b8756f41f87c1a62e38595005ec8ee7709148ee8c33cf66095146e6d3b80caf668e367dbd4eaf467a26e86f0e0c192a66e61aba25d6507471a799e2583ce801c66d9d703eaa894a836b8fadd54d4da900a0a5d8c15f2de2e4690ec612771cf8076afaede32fc4fb44bf1a5e1c980d833e4ef4ea0b4657a2487a2dbe5257ecbd9807a5baca4e9c85aac250a04c25f1b2d6c310e28a83d3298ce406fe53b1988e08b80c9ebe8c4d261fd25aaf7fc3e4a03b26bcfa906ae8a97e78ffda8a1963a90d0b3",
            "9ec365c3cf59d671eb72da0e7a4113c41002505f0e7b9012096b41c4eb3aaf947f6ea429080000685f0f1f0515f462cdcf84e0f1d6045dfcbb2010f98bf584010000",
        ]);

        let trie = build_trie(&proof, root_hash).unwrap();
        assert_eq!(trie.get(&TIMESTAMP_KEY).unwrap().as_ref(), hex!("10f98bf584010000"));

        verify(&proof, root_hash, &TIMESTAMP_KEY, &hex!("10f98bf584010000")).unwrap();
    }

    /// Astar parachain storage proof for block 2502278.
    #[test]
    fn astar_timestamp_proof() {
        let root_hash =
            b256!("f22cccdc8e6ec676feaa98a11a00ea4be778eee3ee3c932fce123420ae8f275f");
        let proof = proof_nodes(&[
            "80fffa80858bc2a0101d60ed17b72862dc325ccc3166479c6f42c8b40efaea455da55eef8038184dd577bfdcaeb1aac46b3b133fb291ac569726851abef4f78eb4b8f3832980efc2598f6a51c464ca11b8292c91c8aaa1423e81b69be2917c6eede365a9c3bf80ad74fedecda93568b32288ee19e9070a7bfedd7ba908f70f8488fb9b2942c7b080a4dc8a4762bdcdb9c218a05e3d736b7b841f6b43416348e7d1fa1da243e1d36980b8c7bbea7b80adccb43bfeabc3404b8e5ea9bfd38489d15a0d364262c7c6d76380ee8f61b9f838f96531cfc3d993ba46e7d7112f06501e9ecba4c921616e585c2080c48a21cb310ebf7b8ac396beebf4daf2460e3acb21e9257761ce4aaedb9345fa808f1fd39b1c0600dd95bc150237d86b8b583118ea3c760d2e873338242d672c5e80bd03756919c080d6f206c2b99d4fdb0e37c8d305ce0c0ee8350bd4e2aea6f51b801131c53f05d71d5646d916bd7cfe9cf202187d585f95e69f3cbd272cc89eac418085ba31b59e40c53c4a00a0c0fbe984b967dbe21550d448db14547f644946cfeb80a889835bb7b755b52804c9e5cbcf5b917fa3713a3d6da21cf01b291d841368d880d03e0f4aa0ff9a22a9e1a8df4f52fba3721a9b55981c9530a052cfede8056247",
            "9f00c365c3cf59d671eb72da0e7a4113c41002505f0e7b9012096b41c4eb3aaf947f6ea429080000685f0f1f0515f462cdcf84e0f1d6045dfcbb20cf90af0f85010000",
        ]);

        let trie = build_trie(&proof, root_hash).unwrap();
        assert_eq!(trie.get(&TIMESTAMP_KEY).unwrap().as_ref(), hex!("cf90af0f85010000"));

        verify(&proof, root_hash, &TIMESTAMP_KEY, &hex!("cf90af0f85010000")).unwrap();

        // A wrong expected value is rejected against the same proof.
        let error =
            verify(&proof, root_hash, &TIMESTAMP_KEY, &hex!("0000000000000000")).unwrap_err();
        assert!(matches!(error, ProofError::ValueMismatch { .. }));

        // A key the proof does not cover reports not-found.
        let uncovered = hex!("f0c365c3cf59d671eb72da0e7a4113c49f1f0515f462cdcf84e0f1d6045dfcbc");
        assert!(matches!(
            verify(&proof, root_hash, &uncovered, &[]),
            Err(ProofError::KeyNotFound { .. })
        ));
    }

    /// A proof assembled through the public node API round-trips through
    /// verification.
    #[test]
    fn constructed_proof_round_trip() {
        let leaf = LeafNode::new(
            Nibbles::from_nibbles([0x8, 0xa, 0x0, 0x1]),
            Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
        );
        let encoding = Bytes::from(leaf.encode());
        let root_hash = merkle_value_root(&encoding);

        let trie = build_trie(&[encoding.clone()], root_hash).unwrap();
        assert_eq!(trie.root().map(TrieNode::is_dirty), Some(true));

        verify(&[encoding], root_hash, &[0x8a, 0x01], &[0xde, 0xad, 0xbe, 0xef]).unwrap();
    }
}
