//! # Sentinel Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs      # Facade harness, scripted collaborators, identities
//! ├── integration/     # Cross-module flows through the facade and event bus
//! └── exploits/        # Attack simulations against the enforcement layer
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sg-tests
//!
//! # By category
//! cargo test -p sg-tests integration::
//! cargo test -p sg-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p sg-tests
//! ```

pub mod fixtures;
pub mod integration;
