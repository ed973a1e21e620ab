//! Per-client request timestamps.

use shared_types::Timestamp;
use std::collections::VecDeque;

/// Timestamps of allowed requests, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLog {
    timestamps: VecDeque<Timestamp>,
}

impl RequestLog {
    /// Drops timestamps that fell out of the window.
    ///
    /// A timestamp `t` is retained while `now - t <= window_ms`.
    /// Returns how many were dropped.
    pub fn prune(&mut self, now: Timestamp, window_ms: u64) -> usize {
        let cutoff = now.saturating_sub(window_ms);
        let before = self.timestamps.len();
        self.timestamps.retain(|&t| t >= cutoff);
        before - self.timestamps.len()
    }

    /// Timestamps with `now - t < span_ms`.
    #[must_use]
    pub fn count_within(&self, now: Timestamp, span_ms: u64) -> usize {
        self.timestamps
            .iter()
            .filter(|&&t| now.saturating_sub(t) < span_ms)
            .count()
    }

    pub fn record(&mut self, now: Timestamp) {
        self.timestamps.push_back(now);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<Timestamp> {
        self.timestamps.back().copied()
    }
}
