//! # Event Handlers
//!
//! Observers attached to the bus with [`InMemoryEventBus::spawn_handler`].
//!
//! [`InMemoryEventBus::spawn_handler`]: crate::InMemoryEventBus::spawn_handler

use crate::events::{SecurityEvent, Severity};
use parking_lot::Mutex;
use tracing::{error, warn};

/// Callback invoked for every event delivered to a subscription.
pub trait EventHandler: Send + Sync + 'static {
    fn handle(&self, event: &SecurityEvent);
}

/// Keeps a log of security incidents and alerts the configured authorities.
///
/// Only incident types (flood, injection) are recorded. Events above
/// HIGH severity are additionally escalated as countermeasure alerts.
pub struct IncidentRecorder {
    authorities: Vec<String>,
    incidents: Mutex<Vec<SecurityEvent>>,
}

impl IncidentRecorder {
    pub fn new(authorities: Vec<String>) -> Self {
        Self {
            authorities,
            incidents: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn incidents(&self) -> Vec<SecurityEvent> {
        self.incidents.lock().clone()
    }

    #[must_use]
    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }
}

impl EventHandler for IncidentRecorder {
    fn handle(&self, event: &SecurityEvent) {
        if !event.event_type.is_incident() {
            return;
        }

        self.incidents.lock().push(event.clone());

        for authority in &self.authorities {
            warn!(
                target: "incident",
                authority = %authority,
                event_type = %event.event_type,
                severity = %event.severity,
                id = %event.id,
                "Security incident reported"
            );
        }

        if event.severity.is_higher_than(Severity::High) {
            error!(
                target: "incident",
                event_type = %event.event_type,
                source = event.source_id.as_deref().unwrap_or("-"),
                "Critical incident, countermeasures engaged"
            );
        }
    }
}
