//! Merkle tree over governance voters
//!
//! The MerkleVoting contract stores a single 32-byte root and checks each
//! vote against a proof. Both sides must agree on the exact hashing scheme:
//!
//! - Leaf: `SHA256("<address>:<weight>")`, weight defaulting to 1
//! - Node: `SHA256(min(a, b) || max(a, b))`, children ordered by byte value
//! - Odd level: the trailing node is paired with itself
//!
//! Because children are sorted before hashing, a proof is a flat list of
//! sibling hashes with no left/right markers. Leaf pairing is positional, so
//! the root depends on the order of the voter list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::address::{AddressValidator, StrKeyValidator};
use crate::error::{Error, Result};
use crate::types::{Digest32, MerkleRoot};
use crate::{DEFAULT_WEIGHT, ROOT_HEX_LEN};

/// A voter as committed into the tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterLeaf {
    /// Account or contract identifier, hashed byte-for-byte
    pub address: String,

    /// Voting power; `None` and `Some(0)` both hash as 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
}

impl VoterLeaf {
    /// Voter with the default weight
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            weight: None,
        }
    }

    /// Voter with an explicit weight
    pub fn with_weight(address: impl Into<String>, weight: u64) -> Self {
        Self {
            address: address.into(),
            weight: Some(weight),
        }
    }

    /// Weight that goes into the leaf hash
    pub fn effective_weight(&self) -> u64 {
        match self.weight {
            Some(0) | None => DEFAULT_WEIGHT,
            Some(w) => w,
        }
    }

    /// Textual leaf encoding, `<address>:<weight>`
    pub fn encode(&self) -> String {
        format!("{}:{}", self.address, self.effective_weight())
    }
}

impl From<&str> for VoterLeaf {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for VoterLeaf {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

/// Hash a single voter leaf
pub fn hash_leaf(leaf: &VoterLeaf) -> Digest32 {
    let mut hasher = Sha256::new();
    hasher.update(leaf.encode().as_bytes());
    hasher.finalize().into()
}

/// Hash two nodes, smaller digest first
pub fn hash_pair(left: &Digest32, right: &Digest32) -> Digest32 {
    let (a, b) = if left < right {
        (left, right)
    } else {
        (right, left)
    };

    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}

/// Voter tree, level by level (leaves first, root last)
#[derive(Debug, Clone)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest32>>,
}

impl MerkleTree {
    /// Build a tree from voter leaves
    pub fn from_leaves(voters: &[VoterLeaf]) -> Result<Self> {
        Self::from_leaf_hashes(voters.iter().map(hash_leaf).collect())
    }

    /// Build a tree from already hashed leaves
    pub fn from_leaf_hashes(leaf_hashes: Vec<Digest32>) -> Result<Self> {
        if leaf_hashes.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut levels = Vec::new();
        let mut current = leaf_hashes;

        while current.len() > 1 {
            let next: Vec<Digest32> = current
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    // Odd number of nodes: pair the last one with itself
                    let right = pair.get(1).unwrap_or(left);
                    hash_pair(left, right)
                })
                .collect();

            trace!("Level {}: {} -> {} nodes", levels.len(), current.len(), next.len());
            levels.push(current);
            current = next;
        }
        levels.push(current);

        debug!(
            "Built voter tree: {} leaves, depth {}",
            levels[0].len(),
            levels.len() - 1
        );

        Ok(Self { levels })
    }

    /// Get the root digest
    pub fn root(&self) -> MerkleRoot {
        // levels always ends with the single-node root level
        MerkleRoot::new(self.levels[self.levels.len() - 1][0])
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// All levels, leaves first
    pub fn levels(&self) -> &[Vec<Digest32>] {
        &self.levels
    }

    /// Sibling path from the leaf at `index` up to (excluding) the root
    ///
    /// A trailing node on an odd level was hashed with itself, so its own
    /// hash is its sibling at that level and every proof has `depth()`
    /// entries. Proofs produced by the TypeScript governance tooling skip
    /// that level instead; for a self-paired leaf they are one entry shorter
    /// and do not verify against a root built here.
    pub fn proof(&self, index: usize) -> Result<Vec<Digest32>> {
        if index >= self.leaf_count() {
            return Err(Error::LeafIndexOutOfRange {
                index,
                leaf_count: self.leaf_count(),
            });
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut current_index = index;

        for level in &self.levels[..self.depth()] {
            let sibling_index = if current_index % 2 == 1 {
                current_index - 1
            } else if current_index + 1 < level.len() {
                current_index + 1
            } else {
                current_index
            };

            proof.push(level[sibling_index]);
            current_index /= 2;
        }

        Ok(proof)
    }

    /// Proof for the leaf at `index`, hex encoded
    pub fn proof_hex(&self, index: usize) -> Result<Vec<String>> {
        Ok(self.proof(index)?.iter().map(hex::encode).collect())
    }
}

/// Result of building a voter tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTreeResult {
    /// Root as 64 lowercase hex characters
    pub root: String,

    /// Input voters, unchanged
    pub leaves: Vec<VoterLeaf>,

    /// Proof per address; a repeated address keeps the proof of its last occurrence
    pub proofs: BTreeMap<String, Vec<String>>,
}

impl MerkleTreeResult {
    /// Proof for an address, if it was in the voter list
    pub fn proof_for(&self, address: &str) -> Option<&[String]> {
        self.proofs.get(address).map(Vec::as_slice)
    }
}

/// Build the voter tree, validating every address as a Stellar account or contract
pub fn build_merkle_tree(voters: &[VoterLeaf]) -> Result<MerkleTreeResult> {
    build_merkle_tree_with(voters, &StrKeyValidator)
}

/// Build the voter tree with a caller-supplied address validator
///
/// Fails without producing a tree if the list is empty or any address is
/// rejected.
pub fn build_merkle_tree_with(
    voters: &[VoterLeaf],
    validator: &dyn AddressValidator,
) -> Result<MerkleTreeResult> {
    if voters.is_empty() {
        return Err(Error::EmptyInput);
    }

    for voter in voters {
        validator.validate(&voter.address)?;
    }

    let tree = MerkleTree::from_leaves(voters)?;

    let mut proofs = BTreeMap::new();
    for (index, voter) in voters.iter().enumerate() {
        proofs.insert(voter.address.clone(), tree.proof_hex(index)?);
    }

    let root = tree.root();
    debug!("Voter tree root {}.. for {} voters", root.short(), voters.len());

    Ok(MerkleTreeResult {
        root: root.to_hex(),
        leaves: voters.to_vec(),
        proofs,
    })
}

/// Check a voter's proof against a hex root
///
/// Returns `false` for a wrong proof, a wrong root, or proof entries that
/// are not 32-byte hex digests.
pub fn verify_merkle_proof<S: AsRef<str>>(leaf: &VoterLeaf, proof: &[S], root: &str) -> bool {
    let mut hash = hash_leaf(leaf);

    for sibling_hex in proof {
        let mut sibling = [0u8; 32];
        if hex::decode_to_slice(sibling_hex.as_ref(), &mut sibling).is_err() {
            return false;
        }
        hash = hash_pair(&hash, &sibling);
    }

    hex::encode(hash) == root
}

/// Root for an equal-weight voter list
pub fn create_merkle_root_from_addresses<S: AsRef<str>>(addresses: &[S]) -> Result<String> {
    create_merkle_root_from_addresses_with(addresses, &StrKeyValidator)
}

/// Root for an equal-weight voter list, with a caller-supplied validator
pub fn create_merkle_root_from_addresses_with<S: AsRef<str>>(
    addresses: &[S],
    validator: &dyn AddressValidator,
) -> Result<String> {
    let voters: Vec<VoterLeaf> = addresses
        .iter()
        .map(|a| VoterLeaf::with_weight(a.as_ref(), DEFAULT_WEIGHT))
        .collect();
    Ok(build_merkle_tree_with(&voters, validator)?.root)
}

/// Check that a root fits the contract's `BytesN<32>` parameter
pub fn format_root_for_soroban(root: &str) -> Result<String> {
    let len = root.chars().count();
    if len != ROOT_HEX_LEN {
        return Err(Error::InvalidRootLength(len));
    }
    Ok(root.to_string())
}
