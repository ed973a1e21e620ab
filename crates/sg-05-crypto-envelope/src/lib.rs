//! # Cryptographic Envelope Subsystem (SG-05)
//!
//! Confidentiality and integrity for messages exchanged with external
//! collaborators.
//!
//! ## Security Notes
//!
//! The default `Cipher::XorStream` is demonstration grade: the key is
//! repeated cyclically with no IV and no authentication, so equal plaintexts
//! produce equal ciphertexts and bit flips go undetected. Use
//! `Cipher::XChaCha20Poly1305` where confidentiality matters.
//!
//! Signatures are a keyed SHA-512 digest (`SHA-512(message || key)`), not a
//! MAC construction. Verification compares in constant time.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::cipher::{Cipher, ParseCipherError};
pub use domain::key::KeyMaterial;
pub use domain::signature::{sign, verify};
pub use ports::inbound::EnvelopeApi;
pub use service::CryptoEnvelope;
pub use shared_crypto::CryptoError;
