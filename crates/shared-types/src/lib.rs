//! # Shared Types Crate
//!
//! This crate contains the domain vocabulary every Sentinel subsystem speaks:
//! identities, roles, permissions, credentials, the typed denial kinds and the
//! time source used for every window and TTL.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Caller-Owned Identity**: The layer borrows an `Identity` per call and
//!   never persists it.
//! - **Denials Are Values**: Expected refusals are `SecurityError` values,
//!   never panics.

pub mod entities;
pub mod errors;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource, Timestamp};
