//! Hashing utilities for plan digests.

use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute SHA256 hash of a string.
pub fn sha256_str(s: &str) -> String {
    sha256_bytes(s.as_bytes())
}

/// Abbreviate a hex digest for display (first 12 chars).
pub fn short(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}
