//! Outbound (Driven) ports for the MFA subsystem.

use shared_crypto::constant_time_eq;
use shared_types::Identity;

/// One-way password digest.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> String;

    /// Constant-time comparison of `hash(password)` with a stored digest.
    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        constant_time_eq(self.hash(password).as_bytes(), stored_hash.as_bytes())
    }
}

/// Source of six-digit one-time codes.
pub trait OtpGenerator: Send + Sync {
    /// Returns a numeric code in `100000..=999999`.
    fn generate(&self) -> String;
}

/// Compares a biometric sample with the template enrolled for an identity.
pub trait BiometricMatcher: Send + Sync {
    /// Match confidence in `[0, 1]`.
    fn score(&self, identity: &Identity, sample: &str) -> f64;
}
