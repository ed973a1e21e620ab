//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::ValidationResult;
use crate::domain::errors::QueryError;
use crate::domain::query::{BoundValue, SafeQuery};
use shared_bus::Verdict;

/// Primary input-sanitizer API.
pub trait InputSanitizerApi: Send + Sync {
    /// Runs the detectors in order; a rejection carries one HIGH
    /// `SqlInjection` event.
    fn validate(&self, input: &str) -> Verdict<ValidationResult>;

    fn sanitize(&self, input: &str) -> String;

    /// Binds `values` positionally to the `?` placeholders of `template`.
    ///
    /// # Errors
    ///
    /// `QueryError::ParameterCountMismatch` when the counts differ.
    fn build_safe_query(
        &self,
        template: &str,
        values: Vec<BoundValue>,
    ) -> Result<SafeQuery, QueryError>;
}
