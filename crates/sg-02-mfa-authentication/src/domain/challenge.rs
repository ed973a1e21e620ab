//! # Challenge Store
//!
//! One pending one-time code per username, held in a sharded map so
//! unrelated users never contend.
//!
//! ## Invariants
//!
//! - Issuing replaces any unconsumed challenge for the same owner.
//! - A successful verification removes the challenge (single use).
//! - An expired challenge never verifies; it is evicted when looked up.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_crypto::constant_time_eq;
use shared_types::Timestamp;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Challenge {
    pub owner: String,
    code: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Challenge {
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Challenge")
            .field("owner", &self.owner)
            .field("code", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Result of checking a supplied code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeCheck {
    /// Code matched; the challenge has been consumed.
    Verified,
    /// A challenge is pending but the code differs. It stays pending.
    Mismatch,
    /// No challenge is pending for the owner.
    Missing,
    /// The pending challenge outlived its TTL and was evicted.
    Expired,
}

pub struct ChallengeStore {
    challenges: DashMap<String, Challenge>,
    ttl_ms: u64,
}

impl ChallengeStore {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            challenges: DashMap::new(),
            ttl_ms,
        }
    }

    /// Stores `code` as the owner's pending challenge.
    pub fn issue(&self, owner: &str, code: impl Into<String>, now: Timestamp) -> Timestamp {
        let expires_at = now.saturating_add(self.ttl_ms);
        self.challenges.insert(
            owner.to_string(),
            Challenge {
                owner: owner.to_string(),
                code: code.into(),
                issued_at: now,
                expires_at,
            },
        );
        expires_at
    }

    /// Checks `supplied` against the owner's pending challenge.
    ///
    /// Lookup, comparison and consumption happen under the owner's shard
    /// lock, so concurrent verifications of one code succeed at most once.
    pub fn verify(&self, owner: &str, supplied: &str, now: Timestamp) -> ChallengeCheck {
        match self.challenges.entry(owner.to_string()) {
            Entry::Vacant(_) => ChallengeCheck::Missing,
            Entry::Occupied(entry) => {
                if entry.get().is_expired(now) {
                    entry.remove();
                    ChallengeCheck::Expired
                } else if constant_time_eq(entry.get().code.as_bytes(), supplied.as_bytes()) {
                    entry.remove();
                    ChallengeCheck::Verified
                } else {
                    ChallengeCheck::Mismatch
                }
            }
        }
    }

    /// Whether an unexpired challenge is pending for the owner.
    #[must_use]
    pub fn has_pending(&self, owner: &str, now: Timestamp) -> bool {
        self.challenges
            .get(owner)
            .is_some_and(|challenge| !challenge.is_expired(now))
    }

    /// Drops every expired challenge. Returns how many were removed.
    pub fn purge_expired(&self, now: Timestamp) -> usize {
        let before = self.challenges.len();
        self.challenges.retain(|_, challenge| !challenge.is_expired(now));
        before.saturating_sub(self.challenges.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    #[must_use]
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }
}
