//! Digest helpers for hashchain

use sha2::{Digest, Sha256};

/// SHA-256 over the concatenation of `parts`, as lowercase hex.
pub fn sha256_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}
