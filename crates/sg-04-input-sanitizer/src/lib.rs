//! # Input Sanitizer Subsystem (SG-04)
//!
//! Guards every text value that may reach a query.
//!
//! - `validate` rejects input matching any injection detector, reporting the
//!   first detector (in priority order) that matched.
//! - `sanitize` never fails. It strips the dangerous character class and
//!   escapes anything keyword-like that survives.
//! - `build_safe_query` binds values positionally to `?` placeholders. Values
//!   are never spliced into the template text.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{InjectionPattern, ValidationResult};
pub use domain::errors::{PatternError, QueryError};
pub use domain::patterns::{sanitize, PatternSet};
pub use domain::query::{count_placeholders, BoundValue, SafeQuery};
pub use ports::inbound::InputSanitizerApi;
pub use service::InputSanitizer;
