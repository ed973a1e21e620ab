//! Blacklist entries.

use shared_types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlacklistEntry {
    pub blacklisted_at: Timestamp,
}

impl BlacklistEntry {
    pub fn new(blacklisted_at: Timestamp) -> Self {
        Self { blacklisted_at }
    }

    /// Blocks while `now - blacklisted_at < duration_ms`.
    #[must_use]
    pub fn is_active(&self, now: Timestamp, duration_ms: u64) -> bool {
        now.saturating_sub(self.blacklisted_at) < duration_ms
    }

    #[must_use]
    pub fn expires_at(&self, duration_ms: u64) -> Timestamp {
        self.blacklisted_at.saturating_add(duration_ms)
    }
}
