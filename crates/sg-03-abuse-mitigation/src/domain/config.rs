//! Limiter configuration.

use serde::{Deserialize, Serialize};

/// Abuse-mitigation parameters. Durations are whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbuseConfig {
    /// Sliding observation window.
    pub window_secs: u64,
    /// Requests per window at which the client is rate limited.
    pub max_requests: usize,
    /// Trailing window for burst detection.
    pub burst_window_secs: u64,
    /// Requests inside the burst window above which traffic is anomalous.
    pub burst_threshold: usize,
    /// How long a rate-limited client stays blacklisted.
    pub blacklist_duration_secs: u64,
    /// Minimum retained timestamps before burst detection applies.
    pub min_history: usize,
}

impl AbuseConfig {
    #[must_use]
    pub fn window_ms(&self) -> u64 {
        self.window_secs.saturating_mul(1_000)
    }

    #[must_use]
    pub fn burst_window_ms(&self) -> u64 {
        self.burst_window_secs.saturating_mul(1_000)
    }

    #[must_use]
    pub fn blacklist_duration_ms(&self) -> u64 {
        self.blacklist_duration_secs.saturating_mul(1_000)
    }
}

impl Default for AbuseConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 100,
            burst_window_secs: 5,
            burst_threshold: 50,
            blacklist_duration_secs: 15 * 60,
            min_history: 10,
        }
    }
}
