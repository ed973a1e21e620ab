//! Keyed-digest signatures.

use crate::domain::key::KeyMaterial;
use shared_crypto::{constant_time_eq, encode_base64, sha512_concat};

/// `base64(SHA-512(message || key))`.
#[must_use]
pub fn sign(message: &[u8], key: &KeyMaterial) -> String {
    encode_base64(&sha512_concat(&[message, key.as_bytes().as_slice()]))
}

/// Recomputes the signature and compares in constant time.
#[must_use]
pub fn verify(message: &[u8], signature: &str, key: &KeyMaterial) -> bool {
    constant_time_eq(sign(message, key).as_bytes(), signature.as_bytes())
}
