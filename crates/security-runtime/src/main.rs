//! # Sentinel
//!
//! Loads and validates the enforcement-layer configuration, starts the
//! facade with an in-memory event bus and an incident recorder, prints the
//! effective configuration, then sweeps stale state until interrupted.
//!
//! ```text
//! sentinel [CONFIG_PATH]
//! ```
//!
//! `SG_CONFIG` names the file when no argument is given.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use security_runtime::{load_config, maintenance_task, SecurityFacade};
use sentinel_telemetry::init_logging;
use shared_bus::{EventFilter, IncidentRecorder, InMemoryEventBus};

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SG_CONFIG").ok())
        .map(PathBuf::from);

    let config = load_config(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("loading configuration from {}", path.display()),
        None => "loading default configuration".to_string(),
    })?;

    init_logging(&config.telemetry).context("installing logging")?;

    let bus = Arc::new(InMemoryEventBus::new());
    let recorder = Arc::new(IncidentRecorder::new(config.incidents.authorities.clone()));
    let _observer = bus.spawn_handler(EventFilter::all(), recorder);

    let facade = Arc::new(
        SecurityFacade::new(config.clone(), bus.clone()).context("starting security facade")?,
    );

    info!(
        subscribers = bus.subscriber_count(),
        authorities = config.incidents.authorities.len(),
        "Sentinel configuration valid"
    );

    println!("{}", config.to_toml().context("rendering configuration")?);
    print!("{}", facade.metrics().encode().context("encoding metrics")?);

    let maintenance = tokio::spawn(maintenance_task(
        facade.clone(),
        config.maintenance.interval(),
    ));
    info!(
        interval_secs = config.maintenance.interval_secs,
        "Maintenance sweep scheduled"
    );

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    maintenance.abort();
    info!("Sentinel shutting down");
    Ok(())
}
