//! # Domain Layer
//!
//! Detectors, sanitization and query binding. No I/O.

pub mod entities;
pub mod errors;
pub mod patterns;
pub mod query;
