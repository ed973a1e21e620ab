//! # Sentinel Telemetry
//!
//! Structured logging and Prometheus metrics for the enforcement layer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sentinel_telemetry::{init_logging, SecurityMetrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! let metrics = SecurityMetrics::new()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SG_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SG_JSON_LOGS` | `false` | JSON formatted logs |
//! | `SG_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `SG_SERVICE_NAME` | `sentinel` | Service name attached to logs |
//!
//! Audit records are emitted on the `audit` tracing target, so
//! `SG_LOG_LEVEL=warn,audit=info` keeps the audit trail while quieting
//! everything else.

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{DecisionTimer, SecurityMetrics};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
