//! # Domain Layer
//!
//! Challenge bookkeeping and authentication outcomes. No I/O.

pub mod challenge;
pub mod entities;
