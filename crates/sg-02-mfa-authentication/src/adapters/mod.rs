//! Default adapters for the outbound ports.

use crate::ports::outbound::{OtpGenerator, PasswordHasher};
use rand::rngs::OsRng;
use rand::Rng;
use shared_crypto::sha256_hex;

/// Salted SHA-256, hex encoded.
///
/// Fast hashes are unsuitable for stored passwords; swap in a memory-hard
/// hasher through `PasswordHasher` for production credential stores.
#[derive(Debug, Clone)]
pub struct Sha256PasswordHasher {
    salt: String,
}

impl Sha256PasswordHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> String {
        let mut material = Vec::with_capacity(self.salt.len() + password.len());
        material.extend_from_slice(self.salt.as_bytes());
        material.extend_from_slice(password.as_bytes());
        sha256_hex(&material)
    }
}

/// Codes drawn from the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOtpGenerator;

impl OtpGenerator for RandomOtpGenerator {
    fn generate(&self) -> String {
        OsRng.gen_range(100_000u32..1_000_000).to_string()
    }
}
