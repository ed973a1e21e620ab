//! Cipher selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cipher {
    /// Cyclic XOR with the key, base64 output. Unauthenticated.
    #[default]
    XorStream,
    /// Authenticated. Output is base64(nonce || ciphertext).
    #[serde(rename = "xchacha20poly1305")]
    XChaCha20Poly1305,
}

impl Cipher {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::XorStream => "xor_stream",
            Self::XChaCha20Poly1305 => "xchacha20poly1305",
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::XChaCha20Poly1305)
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCipherError(pub String);

impl fmt::Display for ParseCipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cipher '{}'", self.0)
    }
}

impl std::error::Error for ParseCipherError {}

impl FromStr for Cipher {
    type Err = ParseCipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xor" | "xor_stream" => Ok(Self::XorStream),
            "xchacha20poly1305" | "xchacha20-poly1305" | "xchacha" => Ok(Self::XChaCha20Poly1305),
            _ => Err(ParseCipherError(s.to_string())),
        }
    }
}
