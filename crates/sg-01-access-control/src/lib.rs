//! # Access Control Subsystem (SG-01)
//!
//! Role-based authorization over a closed set of permissions.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): The immutable permission table and decision types
//! - **Ports Layer** (`ports/`): The inbound API the facade calls
//! - **Service Layer** (`service.rs`): Evaluates decisions and produces audit events
//!
//! ## Guarantees
//!
//! - The permission table is read-only after construction.
//! - ADMIN holds every permission regardless of configuration.
//! - Every `check_access` outcome, including denial, yields exactly one
//!   audit event and one `audit` tracing record.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::AccessDecision;
pub use domain::errors::AccessControlError;
pub use domain::permission_table::PermissionTable;
pub use ports::inbound::AccessControlApi;
pub use service::AccessControlService;
