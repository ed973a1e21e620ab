//! # SHA-2 Hashing
//!
//! One-shot SHA-256 and SHA-512 helpers.

use sha2::{Digest, Sha256, Sha512};

/// SHA-256 output (256-bit).
pub type Digest256 = [u8; 32];

/// SHA-512 output (512-bit).
pub type Digest512 = [u8; 64];

/// Hash data with SHA-256.
pub fn sha256(data: &[u8]) -> Digest256 {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// Lower-case hex SHA-256 of the data.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// SHA-512 over the concatenation of `parts`, in order.
pub fn sha512_concat(parts: &[&[u8]]) -> Digest512 {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}
