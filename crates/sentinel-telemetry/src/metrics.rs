//! Prometheus metrics for the enforcement layer.
//!
//! All metrics follow the naming convention: `sg_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: decisions by outcome, events published, sink failures
//! - **Gauge**: blacklist size, pending challenges
//! - **Histogram**: decision latency by operation

use prometheus::{
    exponential_buckets, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec,
    IntGauge, Opts, Registry, TextEncoder,
};
use std::time::Instant;

use crate::TelemetryError;

/// Metrics owned by one enforcement context, registered on its own registry.
#[derive(Clone)]
pub struct SecurityMetrics {
    registry: Registry,

    /// Authentication results by outcome (`success`, `password_stage`, ...)
    pub auth_outcomes: IntCounterVec,

    /// Access decisions by decision (`GRANTED`, `UNAUTHORIZED`, ...)
    pub access_decisions: IntCounterVec,

    /// Limiter decisions by decision
    pub limiter_decisions: IntCounterVec,

    /// Input validations by result (`safe`, or the detector name)
    pub input_validations: IntCounterVec,

    /// Security events by type
    pub events_published: IntCounterVec,

    /// Events the sink failed to accept
    pub sink_failures: IntCounter,

    /// Clients currently blacklisted
    pub blacklisted_clients: IntGauge,

    /// Challenges awaiting verification
    pub pending_challenges: IntGauge,

    /// Decision latency by operation
    pub decision_duration: HistogramVec,
}

impl SecurityMetrics {
    /// Creates and registers every metric on a fresh registry.
    ///
    /// # Errors
    ///
    /// `TelemetryError::MetricsInit` if a metric is malformed or registered
    /// twice.
    pub fn new() -> Result<Self, TelemetryError> {
        let auth_outcomes = IntCounterVec::new(
            Opts::new("sg_auth_outcomes_total", "Authentication attempts by outcome"),
            &["outcome"],
        )
        .map_err(metrics_err)?;

        let access_decisions = IntCounterVec::new(
            Opts::new("sg_access_decisions_total", "Access decisions by result"),
            &["decision"],
        )
        .map_err(metrics_err)?;

        let limiter_decisions = IntCounterVec::new(
            Opts::new("sg_limiter_decisions_total", "Abuse limiter decisions by result"),
            &["decision"],
        )
        .map_err(metrics_err)?;

        let input_validations = IntCounterVec::new(
            Opts::new("sg_input_validations_total", "Input validations by result"),
            &["result"],
        )
        .map_err(metrics_err)?;

        let events_published = IntCounterVec::new(
            Opts::new("sg_events_published_total", "Security events forwarded to the sink"),
            &["event_type"],
        )
        .map_err(metrics_err)?;

        let sink_failures = IntCounter::new(
            "sg_event_sink_failures_total",
            "Security events the sink did not accept",
        )
        .map_err(metrics_err)?;

        let blacklisted_clients = IntGauge::new(
            "sg_limiter_blacklisted_clients",
            "Clients currently blacklisted",
        )
        .map_err(metrics_err)?;

        let pending_challenges = IntGauge::new(
            "sg_auth_pending_challenges",
            "One-time codes awaiting verification",
        )
        .map_err(metrics_err)?;

        let decision_duration = HistogramVec::new(
            HistogramOpts::new(
                "sg_decision_duration_seconds",
                "Time spent producing a security decision",
            )
            .buckets(exponential_buckets(0.000_001, 4.0, 12).map_err(metrics_err)?),
            &["operation"],
        )
        .map_err(metrics_err)?;

        let registry = Registry::new();
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(auth_outcomes.clone()),
            Box::new(access_decisions.clone()),
            Box::new(limiter_decisions.clone()),
            Box::new(input_validations.clone()),
            Box::new(events_published.clone()),
            Box::new(sink_failures.clone()),
            Box::new(blacklisted_clients.clone()),
            Box::new(pending_challenges.clone()),
            Box::new(decision_duration.clone()),
        ];
        for collector in collectors {
            registry.register(collector).map_err(metrics_err)?;
        }

        Ok(Self {
            registry,
            auth_outcomes,
            access_decisions,
            limiter_decisions,
            input_validations,
            events_published,
            sink_failures,
            blacklisted_clients,
            pending_challenges,
            decision_duration,
        })
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Starts timing `operation`. Observation happens on drop.
    #[must_use]
    pub fn time(&self, operation: &str) -> DecisionTimer {
        DecisionTimer {
            histogram: self.decision_duration.with_label_values(&[operation]),
            start: Instant::now(),
        }
    }

    /// Encode all metrics as Prometheus text format.
    ///
    /// # Errors
    ///
    /// `TelemetryError::MetricsInit` if encoding fails.
    pub fn encode(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(metrics_err)?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
    }
}

fn metrics_err(e: prometheus::Error) -> TelemetryError {
    TelemetryError::MetricsInit(e.to_string())
}

/// Timer guard for automatic histogram observation.
pub struct DecisionTimer {
    histogram: prometheus::Histogram,
    start: Instant,
}

impl Drop for DecisionTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
