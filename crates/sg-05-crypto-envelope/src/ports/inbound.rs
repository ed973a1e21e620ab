//! # Inbound Ports (Driving Ports / API)

use crate::domain::key::KeyMaterial;
use shared_crypto::CryptoError;

/// Primary envelope API.
pub trait EnvelopeApi: Send + Sync {
    fn derive_key(&self, secret: &[u8]) -> KeyMaterial;

    /// Encrypts with the configured cipher; output is base64 text.
    ///
    /// # Errors
    ///
    /// `CryptoError::EncryptionFailed` from the authenticated cipher.
    fn encrypt(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<String, CryptoError>;

    /// # Errors
    ///
    /// `InvalidEncoding` for malformed base64; `DecryptionFailed` when the
    /// authenticated cipher rejects the input.
    fn decrypt(&self, ciphertext: &str, key: &KeyMaterial) -> Result<Vec<u8>, CryptoError>;

    fn sign(&self, message: &[u8], key: &KeyMaterial) -> String;

    fn verify(&self, message: &[u8], signature: &str, key: &KeyMaterial) -> bool;
}
