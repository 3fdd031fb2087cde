//! Voter address validation
//!
//! The Merkle tree treats addresses as opaque strings. Whether an address is
//! well formed is decided by an [`AddressValidator`], so the tree stays usable
//! outside Stellar. [`StrKeyValidator`] is the default and accepts the two
//! address forms a Soroban `Address` can take:
//!
//! - `G...` Ed25519 account public keys
//! - `C...` contract addresses
//!
//! Both are StrKey encoded (base32, version byte, CRC16-XModem checksum), so a
//! single mistyped character is rejected rather than silently committed into
//! a governance root.

use serde::{Deserialize, Serialize};
use stellar_strkey::Strkey;

use crate::error::{Error, Result};

/// Decides whether an address may appear in a voter tree
pub trait AddressValidator: Send + Sync {
    /// Return `Err(Error::InvalidAddress)` naming the address if it is rejected
    fn validate(&self, address: &str) -> Result<()>;
}

/// Kind of Stellar address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Ed25519 account (`G...`)
    PublicKey,
    /// Soroban contract (`C...`)
    Contract,
}

impl AddressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressKind::PublicKey => "public_key",
            AddressKind::Contract => "contract",
        }
    }
}

/// Validator backed by StrKey decoding
#[derive(Debug, Clone, Copy, Default)]
pub struct StrKeyValidator;

impl AddressValidator for StrKeyValidator {
    fn validate(&self, address: &str) -> Result<()> {
        match address_kind(address) {
            Some(_) => Ok(()),
            None => Err(Error::InvalidAddress(address.to_string())),
        }
    }
}

/// Validator that accepts any string
///
/// For callers that validated upstream, and for exercising the tree with
/// placeholder identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AddressValidator for AcceptAll {
    fn validate(&self, _address: &str) -> Result<()> {
        Ok(())
    }
}

/// Classify a Stellar address, `None` if it is neither an account nor a contract
pub fn address_kind(address: &str) -> Option<AddressKind> {
    match Strkey::from_string(address) {
        Ok(Strkey::PublicKeyEd25519(_)) => Some(AddressKind::PublicKey),
        Ok(Strkey::Contract(_)) => Some(AddressKind::Contract),
        _ => None,
    }
}

/// Check whether a string is a valid account or contract address
pub fn is_valid_address(address: &str) -> bool {
    address_kind(address).is_some()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Ed25519 public key for 32 zero bytes
    pub const ACCOUNT_ZERO: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    /// Contract address for 32 zero bytes
    pub const CONTRACT_ZERO: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

    #[test]
    fn test_account_address_is_valid() {
        assert!(is_valid_address(ACCOUNT_ZERO));
        assert_eq!(address_kind(ACCOUNT_ZERO), Some(AddressKind::PublicKey));
    }

    #[test]
    fn test_contract_address_is_valid() {
        assert!(is_valid_address(CONTRACT_ZERO));
        assert_eq!(address_kind(CONTRACT_ZERO), Some(AddressKind::Contract));
    }

    #[test]
    fn test_bad_checksum_is_rejected() {
        let mut tampered = ACCOUNT_ZERO.to_string();
        tampered.replace_range(55..56, "G");
        assert!(!is_valid_address(&tampered));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("GADDR1"));
        assert!(!is_valid_address("0x742d35Cc6634C0532925a3b844Bc9e7595f12345"));
    }

    #[test]
    fn test_strkey_validator_names_address() {
        let err = StrKeyValidator.validate("not-an-address").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Stellar address: not-an-address");
    }

    #[test]
    fn test_accept_all() {
        assert!(AcceptAll.validate("anything at all").is_ok());
    }
}
