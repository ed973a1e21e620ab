//! # Security Events
//!
//! Defines every notification the enforcement layer emits, plus the
//! [`Verdict`] wrapper subsystems use to hand decisions and events back to the
//! facade.

use serde::{Deserialize, Serialize};
use shared_types::{Role, Timestamp};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// SEVERITY
// =============================================================================

/// Ordered severity scale: LOW(1) < MEDIUM(2) < HIGH(3) < CRITICAL(4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Severity {
    #[must_use]
    pub fn level(&self) -> u8 {
        *self as u8
    }

    #[must_use]
    pub fn is_higher_than(&self, other: Severity) -> bool {
        self.level() > other.level()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

// =============================================================================
// EVENT TYPE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Rate-limit or burst countermeasure fired against a client.
    DdosAttempt,
    /// Input matched an injection detector.
    SqlInjection,
    /// A one-time code was issued and must be delivered to the recipient.
    ChallengeIssued,
    AuthenticationSucceeded,
    AuthenticationFailed,
    /// Outcome of an access check (granted or denied).
    AccessAudit,
    RoleAssigned,
    /// A client was removed from the blacklist manually.
    BlacklistCleared,
}

impl EventType {
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ChallengeIssued | Self::AuthenticationSucceeded | Self::AuthenticationFailed => {
                EventTopic::Authentication
            }
            Self::AccessAudit | Self::RoleAssigned => EventTopic::AccessControl,
            Self::DdosAttempt | Self::BlacklistCleared => EventTopic::AbuseMitigation,
            Self::SqlInjection => EventTopic::InputValidation,
        }
    }

    /// Whether observers should treat the event as a security incident.
    #[must_use]
    pub fn is_incident(&self) -> bool {
        matches!(self, Self::DdosAttempt | Self::SqlInjection)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DdosAttempt => "DDOS_ATTEMPT",
            Self::SqlInjection => "SQL_INJECTION",
            Self::ChallengeIssued => "CHALLENGE_ISSUED",
            Self::AuthenticationSucceeded => "AUTHENTICATION_SUCCEEDED",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::AccessAudit => "ACCESS_AUDIT",
            Self::RoleAssigned => "ROLE_ASSIGNED",
            Self::BlacklistCleared => "BLACKLIST_CLEARED",
        };
        f.write_str(name)
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    Authentication,
    AccessControl,
    AbuseMitigation,
    InputValidation,
    /// All events (no filtering).
    All,
}

// =============================================================================
// AUDIT RECORD
// =============================================================================

/// Structured subject/resource/decision triple attached to audit events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub subject: String,
    pub role: Role,
    pub resource: String,
    pub decision: String,
}

// =============================================================================
// SECURITY EVENT
// =============================================================================

/// A notification pushed to the event sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub id: Uuid,
    pub event_type: EventType,
    pub severity: Severity,
    pub description: String,
    /// Originating client, when the event concerns a request source.
    pub source_id: Option<String>,
    /// Delivery address for notifications meant for a person.
    pub recipient: Option<String>,
    /// Payload delivered to the recipient.
    pub message: Option<String>,
    pub timestamp: Timestamp,
    pub audit: Option<AuditRecord>,
}

impl SecurityEvent {
    pub fn new(
        event_type: EventType,
        severity: Severity,
        description: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            severity,
            description: description.into(),
            source_id: None,
            recipient: None,
            message: None,
            timestamp,
            audit: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_audit(mut self, audit: AuditRecord) -> Self {
        self.audit = Some(audit);
        self
    }

    #[must_use]
    pub fn topic(&self) -> EventTopic {
        self.event_type.topic()
    }
}

impl fmt::Display for SecurityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {}: {} (Severity: {})",
            self.timestamp, self.id, self.event_type, self.description, self.severity
        )
    }
}

// =============================================================================
// VERDICT
// =============================================================================

/// A decision together with the events it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict<T> {
    pub outcome: T,
    pub events: Vec<SecurityEvent>,
}

impl<T> Verdict<T> {
    pub fn silent(outcome: T) -> Self {
        Self {
            outcome,
            events: Vec::new(),
        }
    }

    pub fn with_event(outcome: T, event: SecurityEvent) -> Self {
        Self {
            outcome,
            events: vec![event],
        }
    }

    pub fn push(&mut self, event: SecurityEvent) {
        self.events.push(event);
    }

    /// Splits the verdict into its outcome and events.
    pub fn into_parts(self) -> (T, Vec<SecurityEvent>) {
        (self.outcome, self.events)
    }
}

// =============================================================================
// FILTER
// =============================================================================

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Lowest severity to include. `None` means every severity.
    pub min_severity: Option<Severity>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            min_severity: None,
        }
    }

    /// Create a filter for events at or above a severity.
    #[must_use]
    pub fn at_least(severity: Severity) -> Self {
        Self {
            topics: Vec::new(),
            min_severity: Some(severity),
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SecurityEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let severity_match = self
            .min_severity
            .map_or(true, |min| event.severity >= min);

        topic_match && severity_match
    }
}
