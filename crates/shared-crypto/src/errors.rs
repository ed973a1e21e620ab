//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Authentication tag mismatch or truncated input.
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Text was not valid for the expected encoding.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}
