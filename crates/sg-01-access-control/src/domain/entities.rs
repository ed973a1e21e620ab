//! Access decision types.

use shared_types::SecurityError;
use std::fmt;

/// Outcome of resolving a resource name and checking the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    /// The resource name maps to no known permission.
    UnknownResource,
    /// The permission exists but the role does not hold it.
    Unauthorized,
}

impl AccessDecision {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Maps denials to `SecurityError` so callers can use `?`.
    ///
    /// # Errors
    ///
    /// `UnknownResource` and `Unauthorized` become the matching error kinds.
    pub fn into_result(self, resource: &str) -> Result<(), SecurityError> {
        match self {
            Self::Granted => Ok(()),
            Self::UnknownResource => Err(SecurityError::UnknownResource {
                resource: resource.to_string(),
            }),
            Self::Unauthorized => Err(SecurityError::Unauthorized {
                resource: resource.to_string(),
            }),
        }
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Granted => "GRANTED",
            Self::UnknownResource => "UNKNOWN_RESOURCE",
            Self::Unauthorized => "UNAUTHORIZED",
        };
        f.write_str(label)
    }
}
