#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quorum_core::{build_merkle_tree_with, verify_merkle_proof, AcceptAll, VoterLeaf};

#[derive(Debug, Arbitrary)]
struct Voter {
    address: String,
    weight: Option<u64>,
}

fuzz_target!(|voters: Vec<Voter>| {
    let leaves: Vec<VoterLeaf> = voters
        .into_iter()
        .take(256)
        .map(|v| VoterLeaf {
            address: v.address,
            weight: v.weight,
        })
        .collect();

    let tree = match build_merkle_tree_with(&leaves, &AcceptAll) {
        Ok(tree) => tree,
        Err(_) => {
            // Only an empty list is rejected when every address is accepted
            assert!(leaves.is_empty());
            return;
        }
    };

    assert_eq!(tree.root.len(), 64);

    // The last occurrence of each address owns the proof
    for (index, leaf) in leaves.iter().enumerate() {
        let last = leaves.iter().rposition(|l| l.address == leaf.address);
        if last == Some(index) {
            let proof = tree.proof_for(&leaf.address).unwrap();
            assert!(verify_merkle_proof(leaf, proof, &tree.root));
        }
    }
});
