//! # Domain Layer

pub mod cipher;
pub mod key;
pub mod signature;
