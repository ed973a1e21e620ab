//! Text encodings for binary values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::CryptoError;

/// Standard (padded) base64.
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes standard base64.
///
/// # Errors
///
/// Returns `CryptoError::InvalidEncoding` for malformed input.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))
}
