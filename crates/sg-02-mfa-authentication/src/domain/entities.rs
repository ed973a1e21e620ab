//! Authentication outcomes and configuration.

use serde::{Deserialize, Serialize};
use shared_types::{AuthStage, SecurityError};

/// Default challenge validity: five minutes.
pub const DEFAULT_OTP_TTL_SECS: u64 = 300;

/// Default minimum biometric match score.
pub const DEFAULT_BIOMETRIC_THRESHOLD: f64 = 0.90;

/// Result of running the authentication pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    /// The first stage that did not verify.
    Failed(AuthStage),
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// # Errors
    ///
    /// `Failed(stage)` becomes `SecurityError::AuthenticationFailed`.
    pub fn into_result(self) -> Result<(), SecurityError> {
        match self {
            Self::Success => Ok(()),
            Self::Failed(stage) => Err(SecurityError::AuthenticationFailed { stage }),
        }
    }
}

/// Tunables for the authentication pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfaConfig {
    /// How long an issued challenge stays valid.
    pub otp_ttl_secs: u64,
    /// Scores strictly below this fail the biometric stage.
    pub biometric_threshold: f64,
}

impl MfaConfig {
    #[must_use]
    pub fn otp_ttl_ms(&self) -> u64 {
        self.otp_ttl_secs.saturating_mul(1_000)
    }
}

impl Default for MfaConfig {
    fn default() -> Self {
        Self {
            otp_ttl_secs: DEFAULT_OTP_TTL_SECS,
            biometric_threshold: DEFAULT_BIOMETRIC_THRESHOLD,
        }
    }
}
