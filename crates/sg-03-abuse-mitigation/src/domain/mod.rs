//! # Domain Layer
//!
//! Window arithmetic and decision types. No locking, no clocks.

pub mod blacklist;
pub mod config;
pub mod entities;
pub mod request_log;
