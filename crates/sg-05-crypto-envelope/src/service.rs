//! # Crypto Envelope Service

use crate::domain::cipher::Cipher;
use crate::domain::key::KeyMaterial;
use crate::domain::signature;
use crate::ports::inbound::EnvelopeApi;
use shared_crypto::{decode_base64, encode_base64, open, seal, xor_keystream, CryptoError};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoEnvelope {
    cipher: Cipher,
}

impl CryptoEnvelope {
    #[must_use]
    pub fn new(cipher: Cipher) -> Self {
        Self { cipher }
    }

    #[must_use]
    pub fn cipher(&self) -> Cipher {
        self.cipher
    }

    /// Encrypts UTF-8 text.
    ///
    /// # Errors
    ///
    /// See [`EnvelopeApi::encrypt`].
    pub fn encrypt_text(&self, plaintext: &str, key: &KeyMaterial) -> Result<String, CryptoError> {
        self.encrypt(plaintext.as_bytes(), key)
    }

    /// Decrypts to UTF-8 text.
    ///
    /// # Errors
    ///
    /// As [`EnvelopeApi::decrypt`], plus `InvalidEncoding` when the
    /// plaintext is not UTF-8.
    pub fn decrypt_text(&self, ciphertext: &str, key: &KeyMaterial) -> Result<String, CryptoError> {
        let bytes = self.decrypt(ciphertext, key)?;
        String::from_utf8(bytes).map_err(|e| CryptoError::InvalidEncoding(e.to_string()))
    }
}

impl EnvelopeApi for CryptoEnvelope {
    fn derive_key(&self, secret: &[u8]) -> KeyMaterial {
        KeyMaterial::derive(secret)
    }

    fn encrypt(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<String, CryptoError> {
        let bytes = match self.cipher {
            Cipher::XorStream => xor_keystream(plaintext, key.as_bytes()),
            Cipher::XChaCha20Poly1305 => seal(key.secret_key(), plaintext)?,
        };
        debug!(cipher = %self.cipher, len = plaintext.len(), "Envelope encrypted");
        Ok(encode_base64(&bytes))
    }

    fn decrypt(&self, ciphertext: &str, key: &KeyMaterial) -> Result<Vec<u8>, CryptoError> {
        let bytes = decode_base64(ciphertext).inspect_err(|e| {
            warn!(cipher = %self.cipher, error = %e, "Envelope rejected: malformed ciphertext");
        })?;
        match self.cipher {
            Cipher::XorStream => Ok(xor_keystream(&bytes, key.as_bytes())),
            Cipher::XChaCha20Poly1305 => open(key.secret_key(), &bytes).inspect_err(|e| {
                warn!(cipher = %self.cipher, error = %e, "Envelope rejected: authentication failed");
            }),
        }
    }

    fn sign(&self, message: &[u8], key: &KeyMaterial) -> String {
        signature::sign(message, key)
    }

    fn verify(&self, message: &[u8], signature: &str, key: &KeyMaterial) -> bool {
        let valid = signature::verify(message, signature, key);
        if !valid {
            warn!(target: "audit", len = message.len(), "Signature verification failed");
        }
        valid
    }
}
