//! SHA-512/256 with a domain-separation prefix.

use sha2::{Digest, Sha512_256};

/// Hashes `prefix || data` with SHA-512/256.
pub fn sha512_256_prefixed(prefix: &[u8], data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    hasher.update(prefix);
    hasher.update(data);
    hasher.finalize().into()
}

/// Hashes `data` with SHA-512/256.
pub fn sha512_256(data: &[u8]) -> [u8; 32] {
    sha512_256_prefixed(&[], data)
}
