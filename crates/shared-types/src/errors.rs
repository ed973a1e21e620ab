//! # Error Types
//!
//! Denial kinds shared across subsystems. Every decision type in the layer can
//! be converted into one of these for callers that prefer `?` propagation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stage of the authentication pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthStage {
    Password,
    Otp,
    Biometric,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Password => "PasswordStage",
            Self::Otp => "OtpStage",
            Self::Biometric => "BiometricStage",
        };
        f.write_str(name)
    }
}

/// An expected refusal produced by the enforcement layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecurityError {
    /// A credential factor did not verify.
    #[error("Authentication failed at {stage}")]
    AuthenticationFailed { stage: AuthStage },

    /// The identity's role lacks the permission guarding the resource.
    #[error("Unauthorized access to resource '{resource}'")]
    Unauthorized { resource: String },

    /// The resource name does not map to any permission.
    #[error("Unknown resource '{resource}'")]
    UnknownResource { resource: String },

    /// The client exceeded the sliding-window request threshold.
    #[error("Client {client} rate limited")]
    RateLimited { client: String },

    /// The client is serving a blacklist period.
    #[error("Client {client} is blacklisted")]
    Blacklisted { client: String },

    /// The client's traffic matched the burst anomaly heuristic.
    #[error("Anomalous burst detected from client {client}")]
    AnomalyDetected { client: String },

    /// Input matched an injection detector.
    #[error("Input rejected by injection detector #{pattern_index}")]
    ValidationRejected { pattern_index: usize },
}

/// Failure parsing a role or permission name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEntityError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),
}
