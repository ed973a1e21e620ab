//! # Shared Bus - Security Event Sink
//!
//! Every enforcement decision in Sentinel produces zero or more
//! [`SecurityEvent`]s. Subsystems never push them anywhere themselves: they
//! return them inside a [`Verdict`], and the facade forwards them to an
//! [`EventSink`] supplied by the embedding application.
//!
//! ```text
//! ┌──────────────┐  Verdict<T>   ┌──────────────┐  publish()   ┌──────────────┐
//! │  Subsystem   │ ────────────▶ │    Facade    │ ───────────▶ │  EventSink   │
//! └──────────────┘               └──────────────┘              └──────┬───────┘
//!                                                                     │ subscribe()
//!                                                              ┌──────▼───────┐
//!                                                              │  Observers   │
//!                                                              └──────────────┘
//! ```
//!
//! ## Delivery Semantics
//!
//! - **Fire-and-forget:** publishing never blocks on a consumer and never
//!   changes the decision that produced the event.
//! - **Failures are logged:** a sink error is reported with `tracing` and
//!   dropped.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod handlers;
pub mod publisher;
pub mod subscriber;

pub use events::{
    AuditRecord, EventFilter, EventTopic, EventType, SecurityEvent, Severity, Verdict,
};
pub use handlers::{EventHandler, IncidentRecorder};
pub use publisher::{EventSink, InMemoryEventBus, PublishError, RecordingSink};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
