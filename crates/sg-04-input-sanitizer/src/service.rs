//! # Input Sanitizer Service

use crate::domain::entities::ValidationResult;
use crate::domain::errors::{PatternError, QueryError};
use crate::domain::patterns::{sanitize, PatternSet};
use crate::domain::query::{BoundValue, SafeQuery};
use crate::ports::inbound::InputSanitizerApi;
use shared_bus::{EventType, SecurityEvent, Severity, Verdict};
use shared_types::TimeSource;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct InputSanitizer {
    patterns: PatternSet,
    time: Arc<dyn TimeSource>,
}

impl InputSanitizer {
    /// # Errors
    ///
    /// Fails only if a detector expression does not compile.
    pub fn new(time: Arc<dyn TimeSource>) -> Result<Self, PatternError> {
        Ok(Self {
            patterns: PatternSet::compile()?,
            time,
        })
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }
}

impl InputSanitizerApi for InputSanitizer {
    fn validate(&self, input: &str) -> Verdict<ValidationResult> {
        let result = self.patterns.check(input);

        let ValidationResult::Rejected(pattern) = result else {
            debug!(input_len = input.len(), "Input validated");
            return Verdict::silent(result);
        };

        warn!(
            target: "audit",
            pattern = %pattern,
            input_len = input.len(),
            "Injection pattern detected, input rejected"
        );
        let event = SecurityEvent::new(
            EventType::SqlInjection,
            Severity::High,
            format!("SQL injection attempt blocked by detector {pattern}"),
            self.time.now(),
        );
        Verdict::with_event(result, event)
    }

    fn sanitize(&self, input: &str) -> String {
        let output = sanitize(input);
        if output != input {
            debug!(
                before_len = input.len(),
                after_len = output.len(),
                "Input sanitized"
            );
        }
        output
    }

    fn build_safe_query(
        &self,
        template: &str,
        values: Vec<BoundValue>,
    ) -> Result<SafeQuery, QueryError> {
        let query = SafeQuery::bind(template, values).inspect_err(|err| {
            warn!(template, error = %err, "Rejected query binding");
        })?;
        debug!(
            template,
            bindings = query.bindings().len(),
            "Safe query built"
        );
        Ok(query)
    }
}
