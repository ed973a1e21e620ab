//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that external callers use
//! - **Outbound (Driven)**: Credential hashing, code generation, biometric matching

pub mod inbound;
pub mod outbound;
