//! # Integration Flows
//!
//! Cross-module behaviour observed through the [`SecurityFacade`] and the
//! event sink it publishes to.
//!
//! [`SecurityFacade`]: security_runtime::SecurityFacade

pub mod access_flows;
pub mod auth_flows;
pub mod config_startup;
