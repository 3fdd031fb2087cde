//! Contract deployment salts
//!
//! Factory deployments derive the new contract address from a 32-byte salt.
//! Salts are exchanged as 64-character hex strings.

use std::collections::HashSet;

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::MAX_SALT_BATCH;

/// Generate a random 32-byte salt
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate `count` distinct random salts (1 to [`MAX_SALT_BATCH`])
pub fn generate_multiple_salts(count: usize) -> Result<Vec<String>> {
    if count == 0 || count > MAX_SALT_BATCH {
        return Err(Error::InvalidSaltCount {
            count,
            max: MAX_SALT_BATCH,
        });
    }

    let mut seen = HashSet::with_capacity(count);
    let mut salts = Vec::with_capacity(count);
    while salts.len() < count {
        let salt = generate_salt();
        if seen.insert(salt.clone()) {
            salts.push(salt);
        }
    }
    Ok(salts)
}

/// Derive a salt from a seed string, for predictable contract addresses
pub fn generate_deterministic_salt(seed: &str) -> String {
    hex::encode(Sha256::digest(seed.as_bytes()))
}

/// Check that a salt is exactly 64 hex characters
pub fn is_valid_salt(salt: &str) -> bool {
    salt.len() == 64 && salt.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_salt_format() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 64);
        assert!(is_valid_salt(&salt));
        assert_ne!(salt, generate_salt());
    }

    #[test]
    fn test_multiple_salts_are_unique() {
        let salts = generate_multiple_salts(MAX_SALT_BATCH).unwrap();
        let unique: HashSet<_> = salts.iter().collect();
        assert_eq!(unique.len(), MAX_SALT_BATCH);
    }

    #[test]
    fn test_multiple_salts_count_bounds() {
        assert!(matches!(
            generate_multiple_salts(0),
            Err(Error::InvalidSaltCount { count: 0, .. })
        ));
        assert!(generate_multiple_salts(MAX_SALT_BATCH + 1).is_err());
        assert_eq!(generate_multiple_salts(1).unwrap().len(), 1);
    }

    #[test]
    fn test_deterministic_salt() {
        assert_eq!(
            generate_deterministic_salt("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            generate_deterministic_salt("governance-v1"),
            generate_deterministic_salt("governance-v1")
        );
    }

    #[test]
    fn test_is_valid_salt() {
        assert!(is_valid_salt(&"a".repeat(64)));
        assert!(is_valid_salt(&"AbCd".repeat(16)));
        assert!(!is_valid_salt(&"a".repeat(63)));
        assert!(!is_valid_salt(&"g".repeat(64)));
        assert!(!is_valid_salt(""));
    }
}
