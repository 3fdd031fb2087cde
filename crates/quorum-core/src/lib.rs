//! Quorum Core - Merkle voter commitments for Soroban governance
//!
//! This crate builds the voter Merkle tree whose root is stored by the
//! MerkleVoting governance contract, generates the per-voter proofs that are
//! submitted alongside a vote, and carries the small set of helpers used when
//! preparing a governance deployment (address checks, salts, config builders).
//!
//! The tree is blockchain-agnostic. The only Stellar-specific piece is the
//! default [`address::StrKeyValidator`], which can be swapped for any
//! [`address::AddressValidator`].

pub mod address;
pub mod error;
pub mod governance;
pub mod merkle;
pub mod salt;
pub mod types;

pub use address::{AcceptAll, AddressKind, AddressValidator, StrKeyValidator};
pub use error::{Error, Result};
pub use governance::{GovernanceConfig, GovernanceType, ValidationReport};
pub use merkle::{
    build_merkle_tree, build_merkle_tree_with, create_merkle_root_from_addresses,
    create_merkle_root_from_addresses_with, format_root_for_soroban, hash_leaf, hash_pair,
    verify_merkle_proof, MerkleTree, MerkleTreeResult, VoterLeaf,
};
pub use types::{Digest32, MerkleRoot};

/// Voting weight assigned to a leaf that carries none
pub const DEFAULT_WEIGHT: u64 = 1;

/// Length of a hex-encoded 32-byte digest
pub const ROOT_HEX_LEN: usize = 64;

/// Maximum number of salts produced by a single batch request
pub const MAX_SALT_BATCH: usize = 100;
