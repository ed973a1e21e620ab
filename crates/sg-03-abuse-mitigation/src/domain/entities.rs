//! Limiter decision types.

use shared_types::{ClientId, SecurityError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockReason {
    Blacklisted,
    RateLimited,
    AnomalyDetected,
}

impl BlockReason {
    /// Human-readable trigger carried by countermeasure events.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Blacklisted => "Client is blacklisted",
            Self::RateLimited => "Rate limit exceeded",
            Self::AnomalyDetected => "Anomalous burst pattern",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Blacklisted => "BLACKLISTED",
            Self::RateLimited => "RATE_LIMITED",
            Self::AnomalyDetected => "ANOMALY_DETECTED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterDecision {
    Allowed,
    Blocked(BlockReason),
}

impl LimiterDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// # Errors
    ///
    /// Each block reason maps to the matching `SecurityError` kind.
    pub fn into_result(self, client: &ClientId) -> Result<(), SecurityError> {
        let client = client.to_string();
        match self {
            Self::Allowed => Ok(()),
            Self::Blocked(BlockReason::Blacklisted) => Err(SecurityError::Blacklisted { client }),
            Self::Blocked(BlockReason::RateLimited) => Err(SecurityError::RateLimited { client }),
            Self::Blocked(BlockReason::AnomalyDetected) => {
                Err(SecurityError::AnomalyDetected { client })
            }
        }
    }
}

impl fmt::Display for LimiterDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => f.write_str("ALLOWED"),
            Self::Blocked(reason) => write!(f, "BLOCKED({reason})"),
        }
    }
}

/// What a maintenance sweep removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub request_logs: usize,
    pub blacklist_entries: usize,
}
