//! Staff API token hashing.
//!
//! The server keeps only the SHA-256 digest of the configured staff token
//! and compares digests of presented tokens against it.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hex digest of a token.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Check a presented token against a stored digest.
///
/// Compares every byte of the two digests regardless of where the first
/// difference is.
pub fn verify_token(presented: &str, expected_hash: &str) -> bool {
    let presented_hash = hash_token(presented);
    if presented_hash.len() != expected_hash.len() {
        return false;
    }
    presented_hash
        .bytes()
        .zip(expected_hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
