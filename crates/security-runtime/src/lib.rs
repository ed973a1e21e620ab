//! # Security Runtime
//!
//! Assembles the enforcement layer: configuration, telemetry and the
//! [`SecurityFacade`] that external collaborators call.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, TOML file, `SG_*` overrides)
//! 2. Validate every parameter; any error aborts startup
//! 3. Install logging
//! 4. Construct subsystems behind the facade, wired to the event sink
//! 5. Spawn [`maintenance_task`] to sweep stale state on an interval
//!
//! ## Wiring
//!
//! ```text
//!  caller ──▶ SecurityFacade ──▶ sg-0x service ──▶ Verdict { outcome, events }
//!                   │                                          │
//!                   │◀─────────────── outcome ─────────────────┤
//!                   └──▶ EventSink::publish(event) ◀───────────┘
//! ```

pub mod config;
pub mod facade;
pub mod maintenance;

pub use config::{
    AccessSettings, ConfigError, EnvelopeSettings, IncidentSettings, MaintenanceSettings,
    MfaSettings, SecurityConfig, DEFAULT_PASSWORD_SALT,
};
pub use facade::{MaintenanceReport, SecurityFacade, SecurityFacadeBuilder, StartupError};
pub use maintenance::maintenance_task;

/// Loads configuration from `path` (or defaults when `None`) and applies
/// `SG_*` environment overrides, then validates.
///
/// # Errors
///
/// Any read, parse, override or validation failure.
pub fn load_config(path: Option<&std::path::Path>) -> Result<SecurityConfig, ConfigError> {
    let mut config = match path {
        Some(path) => SecurityConfig::load(path)?,
        None => SecurityConfig::default(),
    };
    config.apply_env()?;
    config.validate()?;
    Ok(config)
}
