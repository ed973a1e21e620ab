//! # Domain Layer
//!
//! Pure authorization logic with no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod permission_table;
