//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{LimiterDecision, PurgeReport};
use shared_bus::Verdict;
use shared_types::{ClientId, Timestamp};
use std::collections::BTreeMap;

/// Primary abuse-mitigation API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait AbuseMitigationApi: Send + Sync {
    /// Decides whether one request from `client` may proceed.
    ///
    /// Rate-limit and anomaly blocks carry exactly one CRITICAL event.
    fn is_allowed(&self, client: &ClientId) -> Verdict<LimiterDecision>;

    /// Active blacklist entries and when each was created.
    fn blacklisted_clients(&self) -> BTreeMap<ClientId, Timestamp>;

    /// Lifts a blacklist entry. The outcome is whether one existed.
    fn remove_from_blacklist(&self, client: &ClientId) -> Verdict<bool>;

    /// Drops idle request logs and expired blacklist entries.
    fn purge_stale(&self) -> PurgeReport;
}
