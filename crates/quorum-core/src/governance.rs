//! MerkleVoting governance configuration
//!
//! The governance factory deploys a MerkleVoting contract from an admin, the
//! voter root and a deployment salt. These helpers assemble that config and
//! report every problem with it at once.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::AddressValidator;
use crate::error::{Error, Result};
use crate::merkle::create_merkle_root_from_addresses_with;
use crate::salt::{generate_salt, is_valid_salt};

/// Governance contract flavour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceType {
    #[default]
    MerkleVoting,
}

/// Deployment parameters for a governance contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    pub governance_type: GovernanceType,
    pub admin: String,
    /// Voter Merkle root, 64 hex characters
    #[serde(default)]
    pub root_hash: String,
    pub salt: String,
}

/// Outcome of validating a config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a governance config, collecting every error
pub fn validate_governance_config(
    config: &GovernanceConfig,
    validator: &dyn AddressValidator,
) -> ValidationReport {
    let mut errors = Vec::new();

    if validator.validate(&config.admin).is_err() {
        errors.push(format!("Invalid admin address: {}", config.admin));
    }

    if config.root_hash.is_empty() {
        errors.push("Merkle voting requires root_hash".to_string());
    } else if !is_valid_salt(&config.root_hash) {
        errors.push("Invalid root_hash format (must be 64-character hex string)".to_string());
    }

    if !is_valid_salt(&config.salt) {
        errors.push(format!(
            "Invalid salt (must be 64-character hex string): {}",
            config.salt
        ));
    }

    ValidationReport::from_errors(errors)
}

/// Build and validate a MerkleVoting config, generating a salt when none is given
pub fn build_governance_config(
    admin: &str,
    root_hash: &str,
    salt: Option<String>,
    validator: &dyn AddressValidator,
) -> Result<GovernanceConfig> {
    let config = GovernanceConfig {
        governance_type: GovernanceType::MerkleVoting,
        admin: admin.to_string(),
        root_hash: root_hash.to_string(),
        salt: salt.filter(|s| !s.is_empty()).unwrap_or_else(generate_salt),
    };

    let report = validate_governance_config(&config, validator);
    if !report.valid {
        return Err(Error::InvalidConfig(report.errors.join("\n")));
    }

    Ok(config)
}

/// Build a MerkleVoting config whose root commits to equal-weight voters
pub fn build_merkle_voting_config<S: AsRef<str>>(
    admin: &str,
    voter_addresses: &[S],
    validator: &dyn AddressValidator,
) -> Result<GovernanceConfig> {
    let root_hash = create_merkle_root_from_addresses_with(voter_addresses, validator)?;
    debug!(
        "Merkle voting root {} for {} voters",
        root_hash,
        voter_addresses.len()
    );
    build_governance_config(admin, &root_hash, None, validator)
}
