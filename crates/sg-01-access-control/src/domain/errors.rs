//! Access-control configuration errors.

use thiserror::Error;

/// Errors raised while building a permission table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessControlError {
    #[error("Unknown role '{0}' in permission table")]
    UnknownRole(String),

    #[error("Unknown permission '{permission}' granted to role {role}")]
    UnknownPermission { role: String, permission: String },
}
