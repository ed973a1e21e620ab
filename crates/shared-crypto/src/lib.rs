//! # Shared Crypto - Primitives for the Enforcement Layer
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, SHA-512 | Key derivation, password digests, signatures |
//! | `symmetric` | XChaCha20-Poly1305, cyclic XOR | Envelope confidentiality |
//! | `encoding` | Base64 (standard), hex | Text transport of binary values |
//! | `compare` | Constant-time equality | Digest and code comparison |
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit random nonce, authenticated
//! - **XOR keystream**: no IV, no authentication; demonstration grade only
//! - **Secret keys** are zeroized on drop

#![warn(clippy::all)]

pub mod compare;
pub mod encoding;
pub mod errors;
pub mod hashing;
pub mod symmetric;

pub use compare::constant_time_eq;
pub use encoding::{decode_base64, encode_base64};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_hex, sha512_concat, Digest256, Digest512};
pub use symmetric::{open, seal, xor_keystream, Nonce, SecretKey, NONCE_LEN};
