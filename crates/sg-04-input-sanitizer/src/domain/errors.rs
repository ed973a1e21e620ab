//! Sanitizer errors.

use thiserror::Error;

/// Errors from binding values to a query template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Template has {placeholders} placeholders but {values} values were supplied")]
    ParameterCountMismatch { placeholders: usize, values: usize },
}

/// A detector expression failed to compile.
#[derive(Debug, Error)]
#[error("Injection detector {index} failed to compile: {source}")]
pub struct PatternError {
    pub index: usize,
    #[source]
    pub source: regex::Error,
}
