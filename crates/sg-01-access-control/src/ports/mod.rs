//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that external callers use
//!
//! Time is read through `shared_types::TimeSource`.

pub mod inbound;
