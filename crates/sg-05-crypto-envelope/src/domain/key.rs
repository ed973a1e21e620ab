//! Envelope key material.

use shared_crypto::SecretKey;

/// 256-bit key derived from a shared secret. Zeroized on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    key: SecretKey,
}

impl KeyMaterial {
    /// SHA-256 of `secret`. Deterministic: equal secrets give equal keys.
    #[must_use]
    pub fn derive(secret: &[u8]) -> Self {
        Self {
            key: SecretKey::derive(secret),
        }
    }

    #[must_use]
    pub fn from_secret_key(key: SecretKey) -> Self {
        Self { key }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.key.as_bytes()
    }

    #[must_use]
    pub fn secret_key(&self) -> &SecretKey {
        &self.key
    }
}
