//! Token generation and hashing.
//!
//! Raw tokens are shown once at issue time; only the SHA-256 hex digest
//! is ever stored.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh raw API token.
#[must_use]
pub fn generate_token() -> String {
    format!("uc_{}{}", Uuid::now_v7().simple(), Uuid::now_v7().simple())
}

/// Hex-encoded SHA-256 of the raw token.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_stable_and_hex_encoded() {
        let hash = hash_token("uc_example");

        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, hash_token("uc_example"));
    }

    #[test]
    fn generated_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
