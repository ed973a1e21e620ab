//! # Security Facade
//!
//! The single entry point external collaborators call. Each operation
//! delegates to one subsystem, records metrics, forwards the resulting
//! events to the event sink and returns the decision.
//!
//! ## Event Delivery
//!
//! Publishing is fire-and-forget. A sink failure is logged and counted but
//! never changes a decision.

use crate::config::{ConfigError, SecurityConfig};
use sentinel_telemetry::{metric_inc, SecurityMetrics, TelemetryError};
use shared_bus::{EventSink, SecurityEvent, Verdict};
use shared_types::{
    ClientId, Credentials, Identity, Permission, Role, SystemTimeSource, TimeSource, Timestamp,
};
use sg_01_access_control::{AccessControlApi, AccessControlService, AccessDecision};
use sg_02_mfa_authentication::{
    AuthOutcome, BiometricMatcher, MfaApi, MfaAuthenticator, OtpGenerator, PasswordHasher,
    Sha256PasswordHasher,
};
use sg_03_abuse_mitigation::{
    AbuseMitigationApi, AbuseMitigationLimiter, BlockReason, LimiterDecision,
};
use sg_04_input_sanitizer::{
    BoundValue, InputSanitizer, InputSanitizerApi, PatternError, QueryError, SafeQuery,
    ValidationResult,
};
use sg_05_crypto_envelope::{CryptoEnvelope, CryptoError, EnvelopeApi, KeyMaterial};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort facade construction.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry setup failed: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Input sanitizer setup failed: {0}")]
    Sanitizer(#[from] PatternError),
}

/// What one maintenance sweep removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub expired_challenges: usize,
    pub request_logs: usize,
    pub blacklist_entries: usize,
}

pub struct SecurityFacade {
    access: AccessControlService,
    mfa: MfaAuthenticator,
    limiter: AbuseMitigationLimiter,
    sanitizer: InputSanitizer,
    envelope: CryptoEnvelope,
    sink: Arc<dyn EventSink>,
    metrics: SecurityMetrics,
}

impl SecurityFacade {
    /// Starts a builder; everything not injected gets its production default.
    pub fn builder(config: SecurityConfig, sink: Arc<dyn EventSink>) -> SecurityFacadeBuilder {
        SecurityFacadeBuilder {
            config,
            sink,
            time: None,
            hasher: None,
            otp: None,
            biometric: None,
            metrics: None,
        }
    }

    /// Facade with production defaults for every collaborator.
    ///
    /// # Errors
    ///
    /// See [`SecurityFacadeBuilder::build`].
    pub fn new(config: SecurityConfig, sink: Arc<dyn EventSink>) -> Result<Self, StartupError> {
        Self::builder(config, sink).build()
    }

    #[must_use]
    pub fn metrics(&self) -> &SecurityMetrics {
        &self.metrics
    }

    // =========================================================================
    // AUTHENTICATION
    // =========================================================================

    pub fn authenticate(&self, identity: &Identity, credentials: &Credentials) -> AuthOutcome {
        let _timer = self.metrics.time("authenticate");
        let outcome = self.forward(self.mfa.authenticate(identity, credentials));
        let label = match outcome {
            AuthOutcome::Success => "success".to_string(),
            AuthOutcome::Failed(stage) => stage.to_string(),
        };
        metric_inc!(self.metrics.auth_outcomes, &[label.as_str()]);
        self.metrics
            .pending_challenges
            .set(gauge_value(self.mfa.challenges().len()));
        outcome
    }

    // =========================================================================
    // AUTHORIZATION
    // =========================================================================

    #[must_use]
    pub fn has_permission(&self, identity: &Identity, permission: Permission) -> bool {
        self.access.has_permission(identity, permission)
    }

    pub fn check_access(&self, identity: &Identity, resource: &str) -> AccessDecision {
        let _timer = self.metrics.time("check_access");
        let decision = self.forward(self.access.check_access(identity, resource));
        metric_inc!(self.metrics.access_decisions, &[decision.to_string().as_str()]);
        decision
    }

    /// Returns the previous role.
    pub fn assign_role(&self, identity: &mut Identity, role: Role) -> Role {
        self.forward(self.access.assign_role(identity, role))
    }

    #[must_use]
    pub fn permissions(&self, role: Role) -> BTreeSet<Permission> {
        self.access.permissions(role)
    }

    // =========================================================================
    // ABUSE MITIGATION
    // =========================================================================

    pub fn is_allowed(&self, client: &ClientId) -> LimiterDecision {
        let _timer = self.metrics.time("is_allowed");
        let decision = self.forward(self.limiter.is_allowed(client));
        metric_inc!(self.metrics.limiter_decisions, &[decision.to_string().as_str()]);
        if decision == LimiterDecision::Blocked(BlockReason::RateLimited) {
            self.refresh_blacklist_gauge();
        }
        decision
    }

    #[must_use]
    pub fn blacklisted_clients(&self) -> BTreeMap<ClientId, Timestamp> {
        self.limiter.blacklisted_clients()
    }

    /// Clients with a request log, including idle ones awaiting a sweep.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.limiter.tracked_clients()
    }

    /// Returns whether the client was blacklisted.
    pub fn remove_from_blacklist(&self, client: &ClientId) -> bool {
        let removed = self.forward(self.limiter.remove_from_blacklist(client));
        self.refresh_blacklist_gauge();
        removed
    }

    /// Drops expired challenges, idle request logs and expired blacklist
    /// entries.
    pub fn purge_stale(&self) -> MaintenanceReport {
        let expired_challenges = self.mfa.purge_expired_challenges();
        let limiter = self.limiter.purge_stale();
        let report = MaintenanceReport {
            expired_challenges,
            request_logs: limiter.request_logs,
            blacklist_entries: limiter.blacklist_entries,
        };

        self.metrics
            .pending_challenges
            .set(gauge_value(self.mfa.challenges().len()));
        self.refresh_blacklist_gauge();
        info!(
            expired_challenges = report.expired_challenges,
            request_logs = report.request_logs,
            blacklist_entries = report.blacklist_entries,
            "Maintenance sweep complete"
        );
        report
    }

    // =========================================================================
    // INPUT HANDLING
    // =========================================================================

    pub fn validate(&self, input: &str) -> ValidationResult {
        let _timer = self.metrics.time("validate");
        let result = self.forward(self.sanitizer.validate(input));
        let label = match result {
            ValidationResult::Safe => "safe",
            ValidationResult::Rejected(pattern) => pattern.name(),
        };
        metric_inc!(self.metrics.input_validations, &[label]);
        result
    }

    #[must_use]
    pub fn sanitize(&self, input: &str) -> String {
        self.sanitizer.sanitize(input)
    }

    /// # Errors
    ///
    /// `QueryError::ParameterCountMismatch` when placeholders and values differ.
    pub fn build_safe_query(
        &self,
        template: &str,
        values: Vec<BoundValue>,
    ) -> Result<SafeQuery, QueryError> {
        self.sanitizer.build_safe_query(template, values)
    }

    // =========================================================================
    // ENVELOPE
    // =========================================================================

    #[must_use]
    pub fn derive_key(&self, secret: &[u8]) -> KeyMaterial {
        self.envelope.derive_key(secret)
    }

    /// # Errors
    ///
    /// See [`EnvelopeApi::encrypt`].
    pub fn encrypt(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<String, CryptoError> {
        self.envelope.encrypt(plaintext, key)
    }

    /// # Errors
    ///
    /// See [`EnvelopeApi::decrypt`].
    pub fn decrypt(&self, ciphertext: &str, key: &KeyMaterial) -> Result<Vec<u8>, CryptoError> {
        self.envelope.decrypt(ciphertext, key)
    }

    #[must_use]
    pub fn sign(&self, message: &[u8], key: &KeyMaterial) -> String {
        self.envelope.sign(message, key)
    }

    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &str, key: &KeyMaterial) -> bool {
        self.envelope.verify(message, signature, key)
    }

    // =========================================================================
    // EVENT FORWARDING
    // =========================================================================

    fn forward<T>(&self, verdict: Verdict<T>) -> T {
        let (outcome, events) = verdict.into_parts();
        for event in events {
            self.publish(event);
        }
        outcome
    }

    fn publish(&self, event: SecurityEvent) {
        metric_inc!(
            self.metrics.events_published,
            &[event.event_type.to_string().as_str()]
        );
        let event_id = event.id;
        let event_type = event.event_type;
        if let Err(e) = self.sink.publish(event) {
            metric_inc!(self.metrics.sink_failures);
            warn!(%event_id, %event_type, error = %e, "Event sink rejected security event");
        }
    }

    fn refresh_blacklist_gauge(&self) {
        self.metrics
            .blacklisted_clients
            .set(gauge_value(self.limiter.blacklist_len()));
    }
}

fn gauge_value(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Injection points for collaborators; see [`SecurityFacade::builder`].
pub struct SecurityFacadeBuilder {
    config: SecurityConfig,
    sink: Arc<dyn EventSink>,
    time: Option<Arc<dyn TimeSource>>,
    hasher: Option<Arc<dyn PasswordHasher>>,
    otp: Option<Arc<dyn OtpGenerator>>,
    biometric: Option<Arc<dyn BiometricMatcher>>,
    metrics: Option<SecurityMetrics>,
}

impl SecurityFacadeBuilder {
    #[must_use]
    pub fn time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = Some(time);
        self
    }

    #[must_use]
    pub fn password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    #[must_use]
    pub fn otp_generator(mut self, otp: Arc<dyn OtpGenerator>) -> Self {
        self.otp = Some(otp);
        self
    }

    #[must_use]
    pub fn biometric_matcher(mut self, matcher: Arc<dyn BiometricMatcher>) -> Self {
        self.biometric = Some(matcher);
        self
    }

    #[must_use]
    pub fn metrics(mut self, metrics: SecurityMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validates the configuration and wires every subsystem.
    ///
    /// # Errors
    ///
    /// Invalid configuration, metric registration or detector compilation.
    pub fn build(self) -> Result<SecurityFacade, StartupError> {
        let config = self.config;
        config.validate()?;
        if config.uses_default_salt() {
            warn!("Using the development password salt; set SG_PASSWORD_SALT in production");
        }

        let time = self
            .time
            .unwrap_or_else(|| Arc::new(SystemTimeSource) as Arc<dyn TimeSource>);
        let hasher = self.hasher.unwrap_or_else(|| {
            Arc::new(Sha256PasswordHasher::new(config.mfa.password_salt.clone()))
                as Arc<dyn PasswordHasher>
        });
        let metrics = match self.metrics {
            Some(metrics) => metrics,
            None => SecurityMetrics::new()?,
        };

        let access = AccessControlService::new(config.permission_table()?, time.clone());

        let mut mfa = MfaAuthenticator::new(config.mfa.pipeline.clone(), hasher, time.clone());
        if let Some(otp) = self.otp {
            mfa = mfa.with_otp_generator(otp);
        }
        if let Some(matcher) = self.biometric {
            mfa = mfa.with_biometric_matcher(matcher);
        }

        let limiter = AbuseMitigationLimiter::new(config.abuse.clone(), time.clone());
        let sanitizer = InputSanitizer::new(time)?;
        let envelope = CryptoEnvelope::new(config.envelope.cipher);

        info!(
            cipher = %config.envelope.cipher,
            rate_window_secs = config.abuse.window_secs,
            max_requests = config.abuse.max_requests,
            otp_ttl_secs = config.mfa.pipeline.otp_ttl_secs,
            "Security facade ready"
        );

        Ok(SecurityFacade {
            access,
            mfa,
            limiter,
            sanitizer,
            envelope,
            sink: self.sink,
            metrics,
        })
    }
}
