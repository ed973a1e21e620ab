//! # Abuse Mitigation Limiter
//!
//! Per-client sliding-window limiter with a TTL blacklist and a burst
//! heuristic. See the crate documentation for the decision order.

use crate::domain::blacklist::BlacklistEntry;
use crate::domain::config::AbuseConfig;
use crate::domain::entities::{BlockReason, LimiterDecision, PurgeReport};
use crate::domain::request_log::RequestLog;
use crate::ports::inbound::AbuseMitigationApi;
use dashmap::DashMap;
use shared_bus::{EventType, SecurityEvent, Severity, Verdict};
use shared_types::{ClientId, TimeSource, Timestamp};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct AbuseMitigationLimiter {
    config: AbuseConfig,
    /// Lock order: `logs` entry before `blacklist`.
    logs: DashMap<ClientId, RequestLog>,
    blacklist: DashMap<ClientId, BlacklistEntry>,
    time: Arc<dyn TimeSource>,
}

impl AbuseMitigationLimiter {
    pub fn new(config: AbuseConfig, time: Arc<dyn TimeSource>) -> Self {
        Self {
            config,
            logs: DashMap::new(),
            blacklist: DashMap::new(),
            time,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AbuseConfig {
        &self.config
    }

    /// Number of clients with a request log.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.logs.len()
    }

    /// Timestamps currently retained for `client`, without pruning.
    #[must_use]
    pub fn request_count(&self, client: &ClientId) -> usize {
        self.logs.get(client).map_or(0, |log| log.len())
    }

    /// Blacklist entries held, including expired ones not yet evicted.
    #[must_use]
    pub fn blacklist_len(&self) -> usize {
        self.blacklist.len()
    }

    /// Whether `client` is currently blocked by an active blacklist entry.
    #[must_use]
    pub fn is_blacklisted(&self, client: &ClientId) -> bool {
        let now = self.time.now();
        self.blacklist
            .get(client)
            .is_some_and(|entry| entry.is_active(now, self.config.blacklist_duration_ms()))
    }

    /// Evicts an expired entry, then reports whether an active one remains.
    fn blacklist_blocks(&self, client: &ClientId, now: Timestamp) -> bool {
        let duration = self.config.blacklist_duration_ms();
        if self
            .blacklist
            .remove_if(client, |_, entry| !entry.is_active(now, duration))
            .is_some()
        {
            info!(client = %client, "Blacklist entry expired, client evicted");
        }
        self.blacklist.contains_key(client)
    }

    fn countermeasure(
        &self,
        client: &ClientId,
        reason: BlockReason,
        now: Timestamp,
    ) -> Verdict<LimiterDecision> {
        error!(
            target: "audit",
            client = %client,
            reason = %reason,
            "Abuse countermeasure activated"
        );
        let event = SecurityEvent::new(
            EventType::DdosAttempt,
            Severity::Critical,
            format!(
                "Abuse detected from client {client} - {}",
                reason.describe()
            ),
            now,
        )
        .with_source(client.as_str());
        Verdict::with_event(LimiterDecision::Blocked(reason), event)
    }
}

impl AbuseMitigationApi for AbuseMitigationLimiter {
    fn is_allowed(&self, client: &ClientId) -> Verdict<LimiterDecision> {
        let now = self.time.now();
        let mut log = self.logs.entry(client.clone()).or_default();

        if self.blacklist_blocks(client, now) {
            warn!(target: "audit", client = %client, decision = "BLOCKED(BLACKLISTED)", "Limiter decision");
            return Verdict::silent(LimiterDecision::Blocked(BlockReason::Blacklisted));
        }

        let pruned = log.prune(now, self.config.window_ms());
        if pruned > 0 {
            debug!(client = %client, pruned, "Request log pruned");
        }

        if log.len() >= self.config.max_requests {
            self.blacklist
                .insert(client.clone(), BlacklistEntry::new(now));
            warn!(
                client = %client,
                window_requests = log.len(),
                blacklist_secs = self.config.blacklist_duration_secs,
                "Client blacklisted"
            );
            return self.countermeasure(client, BlockReason::RateLimited, now);
        }

        if log.len() >= self.config.min_history {
            let recent = log.count_within(now, self.config.burst_window_ms());
            if recent > self.config.burst_threshold {
                debug!(client = %client, recent, "Burst threshold exceeded");
                return self.countermeasure(client, BlockReason::AnomalyDetected, now);
            }
        }

        log.record(now);
        info!(target: "audit", client = %client, decision = "ALLOWED", window_requests = log.len(), "Limiter decision");
        Verdict::silent(LimiterDecision::Allowed)
    }

    fn blacklisted_clients(&self) -> BTreeMap<ClientId, Timestamp> {
        let now = self.time.now();
        let duration = self.config.blacklist_duration_ms();
        self.blacklist
            .iter()
            .filter(|entry| entry.value().is_active(now, duration))
            .map(|entry| (entry.key().clone(), entry.value().blacklisted_at))
            .collect()
    }

    fn remove_from_blacklist(&self, client: &ClientId) -> Verdict<bool> {
        if self.blacklist.remove(client).is_none() {
            return Verdict::silent(false);
        }

        info!(target: "audit", client = %client, "Client manually removed from blacklist");
        let event = SecurityEvent::new(
            EventType::BlacklistCleared,
            Severity::Low,
            format!("Client {client} manually removed from blacklist"),
            self.time.now(),
        )
        .with_source(client.as_str());
        Verdict::with_event(true, event)
    }

    fn purge_stale(&self) -> PurgeReport {
        let now = self.time.now();
        let window = self.config.window_ms();
        let duration = self.config.blacklist_duration_ms();

        let logs_before = self.logs.len();
        self.logs.retain(|_, log| {
            log.prune(now, window);
            !log.is_empty()
        });

        let blacklist_before = self.blacklist.len();
        self.blacklist
            .retain(|_, entry| entry.is_active(now, duration));

        let report = PurgeReport {
            request_logs: logs_before.saturating_sub(self.logs.len()),
            blacklist_entries: blacklist_before.saturating_sub(self.blacklist.len()),
        };
        debug!(
            request_logs = report.request_logs,
            blacklist_entries = report.blacklist_entries,
            "Stale limiter state purged"
        );
        report
    }
}
