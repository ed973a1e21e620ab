//! # MFA Authenticator
//!
//! Wires the challenge store and the outbound ports into the staged pipeline.

use crate::adapters::RandomOtpGenerator;
use crate::domain::challenge::{ChallengeCheck, ChallengeStore};
use crate::domain::entities::{AuthOutcome, MfaConfig};
use crate::ports::inbound::MfaApi;
use crate::ports::outbound::{BiometricMatcher, OtpGenerator, PasswordHasher};
use shared_bus::{AuditRecord, EventType, SecurityEvent, Severity, Verdict};
use shared_types::{AuthStage, Credentials, Identity, TimeSource, Timestamp};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct MfaAuthenticator {
    hasher: Arc<dyn PasswordHasher>,
    otp: Arc<dyn OtpGenerator>,
    biometric: Option<Arc<dyn BiometricMatcher>>,
    challenges: ChallengeStore,
    config: MfaConfig,
    time: Arc<dyn TimeSource>,
}

impl MfaAuthenticator {
    /// Creates an authenticator with OS-random codes and no biometric matcher.
    pub fn new(
        config: MfaConfig,
        hasher: Arc<dyn PasswordHasher>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            hasher,
            otp: Arc::new(RandomOtpGenerator),
            biometric: None,
            challenges: ChallengeStore::new(config.otp_ttl_ms()),
            config,
            time,
        }
    }

    #[must_use]
    pub fn with_otp_generator(mut self, otp: Arc<dyn OtpGenerator>) -> Self {
        self.otp = otp;
        self
    }

    #[must_use]
    pub fn with_biometric_matcher(mut self, matcher: Arc<dyn BiometricMatcher>) -> Self {
        self.biometric = Some(matcher);
        self
    }

    #[must_use]
    pub fn challenges(&self) -> &ChallengeStore {
        &self.challenges
    }

    #[must_use]
    pub fn config(&self) -> &MfaConfig {
        &self.config
    }

    fn run_otp_stage(
        &self,
        identity: &Identity,
        supplied: Option<&str>,
        now: Timestamp,
        events: &mut Vec<SecurityEvent>,
    ) -> bool {
        let code = self.otp.generate();
        let expires_at = self.challenges.issue(&identity.username, code.as_str(), now);
        events.push(self.challenge_notice(identity, &code, now));
        debug!(user = %identity.username, expires_at, "One-time code issued");

        let Some(supplied) = supplied else {
            debug!(user = %identity.username, "No one-time code supplied");
            return false;
        };

        match self.challenges.verify(&identity.username, supplied, now) {
            ChallengeCheck::Verified => true,
            check => {
                debug!(user = %identity.username, check = ?check, "One-time code rejected");
                false
            }
        }
    }

    fn run_biometric_stage(&self, identity: &Identity, sample: &str) -> bool {
        let Some(matcher) = &self.biometric else {
            warn!(user = %identity.username, "Biometric sample supplied but no matcher configured");
            return false;
        };
        let score = matcher.score(identity, sample);
        debug!(user = %identity.username, score, threshold = self.config.biometric_threshold, "Biometric match scored");
        score >= self.config.biometric_threshold
    }

    fn challenge_notice(&self, identity: &Identity, code: &str, now: Timestamp) -> SecurityEvent {
        let minutes = self.config.otp_ttl_secs / 60;
        let recipient = identity
            .email
            .clone()
            .unwrap_or_else(|| identity.username.clone());
        SecurityEvent::new(
            EventType::ChallengeIssued,
            Severity::Low,
            format!("One-time code issued for {}", identity.username),
            now,
        )
        .with_recipient(recipient)
        .with_message(format!(
            "Your one-time code is {code}. It is valid for {minutes} minutes."
        ))
    }

    fn conclude(
        &self,
        identity: &Identity,
        outcome: AuthOutcome,
        now: Timestamp,
        mut events: Vec<SecurityEvent>,
    ) -> Verdict<AuthOutcome> {
        let (event_type, severity, decision) = match outcome {
            AuthOutcome::Success => {
                info!(target: "audit", subject = %identity.username, role = %identity.role, "Authentication succeeded");
                (
                    EventType::AuthenticationSucceeded,
                    Severity::Low,
                    "SUCCESS".to_string(),
                )
            }
            AuthOutcome::Failed(stage) => {
                warn!(target: "audit", subject = %identity.username, role = %identity.role, stage = %stage, "Authentication failed");
                (
                    EventType::AuthenticationFailed,
                    Severity::Medium,
                    format!("FAILED at {stage}"),
                )
            }
        };

        events.push(
            SecurityEvent::new(
                event_type,
                severity,
                format!("Authentication {decision} for {}", identity.username),
                now,
            )
            .with_audit(AuditRecord {
                subject: identity.username.clone(),
                role: identity.role,
                resource: "AUTHENTICATION".to_string(),
                decision,
            }),
        );

        Verdict { outcome, events }
    }
}

impl MfaApi for MfaAuthenticator {
    fn authenticate(&self, identity: &Identity, credentials: &Credentials) -> Verdict<AuthOutcome> {
        let now = self.time.now();
        let mut events = Vec::new();

        if !self.hasher.verify(&credentials.password, &identity.credential_hash) {
            return self.conclude(identity, AuthOutcome::Failed(AuthStage::Password), now, events);
        }

        if identity.mfa_enabled
            && !self.run_otp_stage(identity, credentials.otp.as_deref(), now, &mut events)
        {
            return self.conclude(identity, AuthOutcome::Failed(AuthStage::Otp), now, events);
        }

        if credentials.has_biometric() {
            let sample = credentials.biometric.as_deref().unwrap_or_default();
            if !self.run_biometric_stage(identity, sample) {
                return self.conclude(
                    identity,
                    AuthOutcome::Failed(AuthStage::Biometric),
                    now,
                    events,
                );
            }
        }

        self.conclude(identity, AuthOutcome::Success, now, events)
    }

    fn purge_expired_challenges(&self) -> usize {
        let removed = self.challenges.purge_expired(self.time.now());
        if removed > 0 {
            debug!(removed, "Expired challenges purged");
        }
        removed
    }
}
