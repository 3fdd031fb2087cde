#![no_main]

use libfuzzer_sys::fuzz_target;
use quorum_core::{format_root_for_soroban, verify_merkle_proof, MerkleRoot, VoterLeaf};

fuzz_target!(|data: &[u8]| {
    // Interpret the input as newline-separated text: address, root, proof entries
    let text = String::from_utf8_lossy(data);
    let mut lines = text.lines();

    let address = lines.next().unwrap_or_default();
    let root = lines.next().unwrap_or_default();
    let proof: Vec<&str> = lines.collect();

    // Arbitrary proofs and roots must never panic
    let _ = verify_merkle_proof(&VoterLeaf::new(address), &proof, root);

    if let Ok(parsed) = MerkleRoot::from_hex(root) {
        assert_eq!(parsed.to_hex(), root.to_ascii_lowercase());
        assert!(format_root_for_soroban(root).is_ok());
    }
});
