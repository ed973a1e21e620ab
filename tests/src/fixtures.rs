//! Shared fixtures: a facade wired to a manual clock, a recording sink and
//! scripted collaborators.

use security_runtime::{SecurityConfig, SecurityFacade, DEFAULT_PASSWORD_SALT};
use sg_02_mfa_authentication::{BiometricMatcher, OtpGenerator, PasswordHasher, Sha256PasswordHasher};
use shared_bus::RecordingSink;
use shared_types::{Identity, ManualTimeSource, Role, UserId};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Arbitrary fixed start time (2023-11-14T22:13:20Z).
pub const EPOCH_MS: u64 = 1_700_000_000_000;

/// Issues `100001`, `100002`, ... so every challenge has a distinct code.
#[derive(Debug, Default)]
pub struct SequentialOtp {
    issued: AtomicU32,
}

impl SequentialOtp {
    /// The most recently issued code, if any.
    pub fn last_issued(&self) -> Option<String> {
        match self.issued.load(Ordering::SeqCst) {
            0 => None,
            n => Some(format!("{}", 100_000 + n)),
        }
    }

    /// The code the next challenge will carry.
    pub fn peek_next(&self) -> String {
        format!("{}", 100_000 + self.issued.load(Ordering::SeqCst) + 1)
    }
}

impl OtpGenerator for SequentialOtp {
    fn generate(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}", 100_000 + n)
    }
}

/// Returns the same score for every sample.
#[derive(Debug, Clone, Copy)]
pub struct FixedScore(pub f64);

impl BiometricMatcher for FixedScore {
    fn score(&self, _identity: &Identity, _sample: &str) -> f64 {
        self.0
    }
}

pub struct Harness {
    pub facade: SecurityFacade,
    pub sink: Arc<RecordingSink>,
    pub clock: Arc<ManualTimeSource>,
    pub otp: Arc<SequentialOtp>,
}

impl Harness {
    pub fn new(config: SecurityConfig) -> Self {
        Self::with_matcher(config, None)
    }

    pub fn standard() -> Self {
        Self::new(SecurityConfig::default())
    }

    pub fn with_matcher(config: SecurityConfig, matcher: Option<FixedScore>) -> Self {
        let sink = Arc::new(RecordingSink::new());
        let clock = Arc::new(ManualTimeSource::new(EPOCH_MS));
        let otp = Arc::new(SequentialOtp::default());

        let mut builder = SecurityFacade::builder(config, sink.clone())
            .time_source(clock.clone())
            .otp_generator(otp.clone());
        if let Some(matcher) = matcher {
            builder = builder.biometric_matcher(Arc::new(matcher));
        }
        let facade = builder.build().expect("test configuration is valid");

        Self {
            facade,
            sink,
            clock,
            otp,
        }
    }
}

/// Identity whose credential hash matches `password` under the default salt.
pub fn user(id: UserId, username: &str, password: &str, role: Role) -> Identity {
    let hasher = Sha256PasswordHasher::new(DEFAULT_PASSWORD_SALT);
    Identity::new(id, username, hasher.hash(password), role)
        .with_email(format!("{username}@city.example"))
}
