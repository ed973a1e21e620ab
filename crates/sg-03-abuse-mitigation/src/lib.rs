//! # Abuse Mitigation Subsystem (SG-03)
//!
//! Decides, per client identifier, whether a request may proceed.
//!
//! ## Decision Order
//!
//! 1. **Blacklist**: an active entry blocks outright; an expired one is
//!    evicted and ignored.
//! 2. **Prune**: timestamps older than the window leave the request log.
//! 3. **Rate limit**: a full window blacklists the client and raises one
//!    CRITICAL event.
//! 4. **Burst anomaly**: with enough history, too many requests inside the
//!    burst window raise one CRITICAL event. No blacklist, nothing recorded.
//! 5. **Allow**: the request timestamp is recorded.
//!
//! ## Concurrency
//!
//! Request logs and blacklist entries live in sharded maps keyed by client.
//! A decision holds the client's request-log entry for its whole duration and
//! only then touches the blacklist map; every code path that holds both
//! acquires them in that order.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::blacklist::BlacklistEntry;
pub use domain::config::AbuseConfig;
pub use domain::entities::{BlockReason, LimiterDecision, PurgeReport};
pub use domain::request_log::RequestLog;
pub use ports::inbound::AbuseMitigationApi;
pub use service::AbuseMitigationLimiter;
