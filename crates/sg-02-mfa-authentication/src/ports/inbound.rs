//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::AuthOutcome;
use shared_bus::Verdict;
use shared_types::{Credentials, Identity};

/// Primary authentication API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait MfaApi: Send + Sync {
    /// Runs the password, OTP and biometric stages in order.
    ///
    /// The verdict carries the `ChallengeIssued` notification (when the OTP
    /// stage ran) followed by one authentication audit event.
    fn authenticate(&self, identity: &Identity, credentials: &Credentials) -> Verdict<AuthOutcome>;

    /// Drops expired challenges. Returns how many were removed.
    fn purge_expired_challenges(&self) -> usize;
}
