//! # Event Publisher
//!
//! Defines the publishing side of the event sink.

use crate::events::{EventFilter, EventType, SecurityEvent};
use crate::handlers::EventHandler;
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Errors returned by a sink when an event could not be delivered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// Nobody is listening; the event was dropped.
    #[error("no subscribers for event {0}")]
    NoSubscribers(String),
}

/// Receiver of security notifications.
///
/// Implementations must not block: the enforcement layer publishes inline
/// with each decision and never waits for acknowledgement.
pub trait EventSink: Send + Sync {
    /// Publish an event.
    ///
    /// # Returns
    ///
    /// The number of consumers that received the event.
    fn publish(&self, event: SecurityEvent) -> Result<usize, PublishError>;
}

// =============================================================================
// IN-MEMORY BUS
// =============================================================================

/// In-memory publish/subscribe implementation of [`EventSink`].
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<SecurityEvent>,

    /// Total events published, including those dropped for lack of receivers.
    events_published: AtomicU64,

    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, min_severity = ?filter.min_severity, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Get a stream of events matching a filter.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.sender.subscribe(), filter)
    }

    /// Attach an observer that runs on its own task until the bus is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_handler(
        &self,
        filter: EventFilter,
        handler: Arc<dyn EventHandler>,
    ) -> tokio::task::JoinHandle<()> {
        let mut subscription = self.subscribe(filter);
        tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                handler.handle(&event);
            }
            debug!("Event handler stopped (bus closed)");
        })
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for InMemoryEventBus {
    fn publish(&self, event: SecurityEvent) -> Result<usize, PublishError> {
        let event_type = event.event_type;
        let event_id = event.id;

        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(event_type = %event_type, id = %event_id, receivers, "Event published");
                Ok(receivers)
            }
            Err(_) => {
                warn!(event_type = %event_type, id = %event_id, "Event dropped (no receivers)");
                Err(PublishError::NoSubscribers(event_type.to_string()))
            }
        }
    }
}

// =============================================================================
// RECORDING SINK
// =============================================================================

/// Sink that keeps every published event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SecurityEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    #[must_use]
    pub fn events(&self) -> Vec<SecurityEvent> {
        self.events.lock().clone()
    }

    /// Published events of one type, in publish order.
    #[must_use]
    pub fn of_type(&self, event_type: EventType) -> Vec<SecurityEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Removes and returns everything recorded.
    pub fn drain(&self) -> Vec<SecurityEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: SecurityEvent) -> Result<usize, PublishError> {
        self.events.lock().push(event);
        Ok(1)
    }
}
