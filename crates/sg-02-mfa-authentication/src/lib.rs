//! # MFA Authentication Subsystem (SG-02)
//!
//! Sequential, short-circuiting authentication pipeline:
//!
//! ```text
//! PasswordStage ──▶ OtpStage (mfa_enabled) ──▶ BiometricStage (sample supplied) ──▶ Success
//!       │                  │                            │
//!       ▼                  ▼                            ▼
//!   Failed(Password)   Failed(Otp)               Failed(Biometric)
//! ```
//!
//! ## Challenges
//!
//! The OTP stage issues a fresh six-digit code, stores it as the identity's
//! only pending challenge (replacing any earlier one), emits a
//! `ChallengeIssued` event for delivery, then checks the caller-supplied code.
//! A challenge verifies at most once and expires after the configured TTL.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{RandomOtpGenerator, Sha256PasswordHasher};
pub use domain::challenge::{Challenge, ChallengeCheck, ChallengeStore};
pub use domain::entities::{AuthOutcome, MfaConfig};
pub use ports::inbound::MfaApi;
pub use ports::outbound::{BiometricMatcher, OtpGenerator, PasswordHasher};
pub use service::MfaAuthenticator;
