//! # Security Configuration
//!
//! Unified configuration for every enforcement subsystem.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. TOML file (`SecurityConfig::load`)
//! 3. `SG_*` environment variables (`SecurityConfig::apply_env`)
//!
//! The role table is read once at construction and never reloaded.

use serde::{Deserialize, Serialize};
use sentinel_telemetry::TelemetryConfig;
use sg_01_access_control::{AccessControlError, PermissionTable};
use sg_02_mfa_authentication::MfaConfig;
use sg_03_abuse_mitigation::AbuseConfig;
use sg_05_crypto_envelope::Cipher;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Salt shipped for development. Must be replaced in production.
pub const DEFAULT_PASSWORD_SALT: &str = "sentinel-dev-salt";

/// Complete enforcement-layer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub access: AccessSettings,
    pub mfa: MfaSettings,
    pub abuse: AbuseConfig,
    pub envelope: EnvelopeSettings,
    pub incidents: IncidentSettings,
    pub maintenance: MaintenanceSettings,
    pub telemetry: TelemetryConfig,
}

/// Role table as role name to permission names.
///
/// Empty means the standard table. ADMIN always holds every permission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    pub roles: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfaSettings {
    #[serde(flatten)]
    pub pipeline: MfaConfig,
    /// Prepended to passwords before hashing.
    pub password_salt: String,
}

impl Default for MfaSettings {
    fn default() -> Self {
        Self {
            pipeline: MfaConfig::default(),
            password_salt: DEFAULT_PASSWORD_SALT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeSettings {
    pub cipher: Cipher,
}

/// Who is notified of incident events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentSettings {
    pub authorities: Vec<String>,
}

impl Default for IncidentSettings {
    fn default() -> Self {
        Self {
            authorities: vec!["security-operations".to_string()],
        }
    }
}

/// How often stale challenges and limiter state are swept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceSettings {
    pub interval_secs: u64,
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

impl MaintenanceSettings {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        var: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error(transparent)]
    AccessControl(#[from] AccessControlError),
}

impl SecurityConfig {
    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, `Parse` when it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// # Errors
    ///
    /// `Parse` when `text` is not a valid configuration document.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// # Errors
    ///
    /// `Render` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies `SG_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// `InvalidEnv` for a variable that does not parse.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `SG_*` overrides from an arbitrary variable source.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `SG_OTP_TTL_SECS` | `mfa.otp_ttl_secs` |
    /// | `SG_BIOMETRIC_THRESHOLD` | `mfa.biometric_threshold` |
    /// | `SG_PASSWORD_SALT` | `mfa.password_salt` |
    /// | `SG_RATE_WINDOW_SECS` | `abuse.window_secs` |
    /// | `SG_RATE_MAX_REQUESTS` | `abuse.max_requests` |
    /// | `SG_BURST_WINDOW_SECS` | `abuse.burst_window_secs` |
    /// | `SG_BURST_THRESHOLD` | `abuse.burst_threshold` |
    /// | `SG_MIN_HISTORY` | `abuse.min_history` |
    /// | `SG_BLACKLIST_SECS` | `abuse.blacklist_duration_secs` |
    /// | `SG_CIPHER` | `envelope.cipher` |
    /// | `SG_MAINTENANCE_INTERVAL_SECS` | `maintenance.interval_secs` |
    /// | `SG_LOG_LEVEL` | `telemetry.log_level` |
    /// | `SG_JSON_LOGS` | `telemetry.json_logs` |
    /// | `SG_CONSOLE_OUTPUT` | `telemetry.console_output` |
    /// | `SG_SERVICE_NAME` | `telemetry.service_name` |
    ///
    /// # Errors
    ///
    /// `InvalidEnv` for a variable that does not parse.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let env = EnvOverrides { lookup };

        env.set("SG_OTP_TTL_SECS", &mut self.mfa.pipeline.otp_ttl_secs)?;
        env.set(
            "SG_BIOMETRIC_THRESHOLD",
            &mut self.mfa.pipeline.biometric_threshold,
        )?;
        env.set("SG_PASSWORD_SALT", &mut self.mfa.password_salt)?;

        env.set("SG_RATE_WINDOW_SECS", &mut self.abuse.window_secs)?;
        env.set("SG_RATE_MAX_REQUESTS", &mut self.abuse.max_requests)?;
        env.set("SG_BURST_WINDOW_SECS", &mut self.abuse.burst_window_secs)?;
        env.set("SG_BURST_THRESHOLD", &mut self.abuse.burst_threshold)?;
        env.set("SG_MIN_HISTORY", &mut self.abuse.min_history)?;
        env.set("SG_BLACKLIST_SECS", &mut self.abuse.blacklist_duration_secs)?;

        env.set("SG_CIPHER", &mut self.envelope.cipher)?;
        env.set(
            "SG_MAINTENANCE_INTERVAL_SECS",
            &mut self.maintenance.interval_secs,
        )?;

        env.set("SG_LOG_LEVEL", &mut self.telemetry.log_level)?;
        env.set_flag("SG_JSON_LOGS", &mut self.telemetry.json_logs)?;
        env.set_flag("SG_CONSOLE_OUTPUT", &mut self.telemetry.console_output)?;
        env.set("SG_SERVICE_NAME", &mut self.telemetry.service_name)?;
        Ok(())
    }

    /// Checks every parameter before anything is constructed.
    ///
    /// # Errors
    ///
    /// The first invalid parameter found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let abuse = &self.abuse;
        require(abuse.window_secs > 0, "abuse.window_secs", "must be positive")?;
        require(abuse.max_requests > 0, "abuse.max_requests", "must be positive")?;
        require(
            abuse.burst_window_secs > 0,
            "abuse.burst_window_secs",
            "must be positive",
        )?;
        require(
            abuse.burst_window_secs < abuse.window_secs,
            "abuse.burst_window_secs",
            "must be shorter than abuse.window_secs",
        )?;
        require(
            abuse.burst_threshold > 0,
            "abuse.burst_threshold",
            "must be positive",
        )?;
        require(
            abuse.blacklist_duration_secs > 0,
            "abuse.blacklist_duration_secs",
            "must be positive",
        )?;

        let mfa = &self.mfa.pipeline;
        require(mfa.otp_ttl_secs > 0, "mfa.otp_ttl_secs", "must be positive")?;
        require(
            (0.0..=1.0).contains(&mfa.biometric_threshold),
            "mfa.biometric_threshold",
            "must be within [0, 1]",
        )?;
        require(
            !self.mfa.password_salt.is_empty(),
            "mfa.password_salt",
            "must not be empty",
        )?;

        require(
            self.maintenance.interval_secs > 0,
            "maintenance.interval_secs",
            "must be positive",
        )?;

        self.permission_table()?;
        Ok(())
    }

    /// Whether the development salt is still in use.
    #[must_use]
    pub fn uses_default_salt(&self) -> bool {
        self.mfa.password_salt == DEFAULT_PASSWORD_SALT
    }

    /// Builds the role table; the standard one when none is configured.
    ///
    /// # Errors
    ///
    /// Unknown role or permission names.
    pub fn permission_table(&self) -> Result<PermissionTable, ConfigError> {
        if self.access.roles.is_empty() {
            return Ok(PermissionTable::standard());
        }
        Ok(PermissionTable::from_names(&self.access.roles)?)
    }
}

fn require(condition: bool, field: &'static str, reason: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: reason.to_string(),
        })
    }
}

struct EnvOverrides<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> EnvOverrides<F> {
    fn set<T>(&self, var: &str, target: &mut T) -> Result<(), ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(value) = (self.lookup)(var) else {
            return Ok(());
        };
        *target = value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnv {
            var: var.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Accepts `true`/`false`/`1`/`0`, case-insensitively.
    fn set_flag(&self, var: &str, target: &mut bool) -> Result<(), ConfigError> {
        let Some(value) = (self.lookup)(var) else {
            return Ok(());
        };
        *target = match value.trim().to_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => {
                return Err(ConfigError::InvalidEnv {
                    var: var.to_string(),
                    value,
                    reason: "expected true, false, 1 or 0".to_string(),
                })
            }
        };
        Ok(())
    }
}
