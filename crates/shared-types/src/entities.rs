//! # Domain Entities
//!
//! Identities, roles, permissions and the credentials presented at login.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseEntityError;

/// Numeric identity handle assigned by the caller.
pub type UserId = u64;

// =============================================================================
// ROLE
// =============================================================================

/// Roles recognised by the access-control table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    CityManager,
    Resident,
    PublicSafety,
    UtilityWorker,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::CityManager,
        Role::Resident,
        Role::PublicSafety,
        Role::UtilityWorker,
    ];

    /// Canonical upper-case name used in configuration and audit records.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::CityManager => "CITY_MANAGER",
            Self::Resident => "RESIDENT",
            Self::PublicSafety => "PUBLIC_SAFETY",
            Self::UtilityWorker => "UTILITY_WORKER",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator - Full system access",
            Self::CityManager => "City Manager - Infrastructure control",
            Self::Resident => "Resident - Basic services access",
            Self::PublicSafety => "Public Safety Officer - Security access",
            Self::UtilityWorker => "Utility Worker - Maintenance access",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ParseEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEntityError::UnknownRole(s.to_string()))
    }
}

// =============================================================================
// PERMISSION
// =============================================================================

/// Closed set of protected resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    // City management
    ControlLights,
    ControlTraffic,
    ViewSensors,
    ExecuteRoutines,
    // Payments
    ProcessPayment,
    ViewTransactions,
    ManageAccounts,
    // Security
    ViewSecurityLogs,
    ManageUsers,
    ConfigureSecurity,
    // System
    SystemAdmin,
    ViewReports,
    DeployUpdates,
}

impl Permission {
    /// Every permission, in declaration order.
    pub const ALL: [Permission; 13] = [
        Permission::ControlLights,
        Permission::ControlTraffic,
        Permission::ViewSensors,
        Permission::ExecuteRoutines,
        Permission::ProcessPayment,
        Permission::ViewTransactions,
        Permission::ManageAccounts,
        Permission::ViewSecurityLogs,
        Permission::ManageUsers,
        Permission::ConfigureSecurity,
        Permission::SystemAdmin,
        Permission::ViewReports,
        Permission::DeployUpdates,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ControlLights => "CONTROL_LIGHTS",
            Self::ControlTraffic => "CONTROL_TRAFFIC",
            Self::ViewSensors => "VIEW_SENSORS",
            Self::ExecuteRoutines => "EXECUTE_ROUTINES",
            Self::ProcessPayment => "PROCESS_PAYMENT",
            Self::ViewTransactions => "VIEW_TRANSACTIONS",
            Self::ManageAccounts => "MANAGE_ACCOUNTS",
            Self::ViewSecurityLogs => "VIEW_SECURITY_LOGS",
            Self::ManageUsers => "MANAGE_USERS",
            Self::ConfigureSecurity => "CONFIGURE_SECURITY",
            Self::SystemAdmin => "SYSTEM_ADMIN",
            Self::ViewReports => "VIEW_REPORTS",
            Self::DeployUpdates => "DEPLOY_UPDATES",
        }
    }

    /// Resolves a resource name by exact, case-insensitive match.
    ///
    /// Surrounding whitespace is not trimmed: `" view_reports"` is unknown.
    #[must_use]
    pub fn for_resource(resource: &str) -> Option<Permission> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.name().eq_ignore_ascii_case(resource))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Permission {
    type Err = ParseEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::for_resource(s).ok_or_else(|| ParseEntityError::UnknownPermission(s.to_string()))
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// An authenticated principal. Owned by the caller and borrowed per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    /// Output of the configured password hasher for this identity.
    pub credential_hash: String,
    pub role: Role,
    pub mfa_enabled: bool,
    /// Delivery address for challenge notifications.
    pub email: Option<String>,
}

impl Identity {
    /// Creates an identity with MFA enabled, matching the default for new accounts.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        credential_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            credential_hash: credential_hash.into(),
            role,
            mfa_enabled: true,
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_mfa(mut self, enabled: bool) -> Self {
        self.mfa_enabled = enabled;
        self
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Factors presented for one authentication attempt.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub otp: Option<String>,
    pub biometric: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            otp: None,
            biometric: None,
        }
    }

    #[must_use]
    pub fn with_otp(mut self, otp: impl Into<String>) -> Self {
        self.otp = Some(otp.into());
        self
    }

    #[must_use]
    pub fn with_biometric(mut self, sample: impl Into<String>) -> Self {
        self.biometric = Some(sample.into());
        self
    }

    /// A biometric sample counts only when present and non-empty.
    #[must_use]
    pub fn has_biometric(&self) -> bool {
        self.biometric.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("otp", &self.otp.as_ref().map(|_| "<redacted>"))
            .field("biometric", &self.biometric.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// =============================================================================
// CLIENT ID
// =============================================================================

/// Opaque identifier of a request source (typically an address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ClientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
