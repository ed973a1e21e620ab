//! Positional query binding.

use crate::domain::errors::QueryError;
use crate::domain::patterns::sanitize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BoundValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl BoundValue {
    /// Text values pass through `sanitize`; other kinds are unchanged.
    #[must_use]
    pub fn sanitized(self) -> Self {
        match self {
            Self::Text(text) => Self::Text(sanitize(&text)),
            other => other,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for BoundValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for BoundValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for BoundValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for BoundValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for BoundValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for BoundValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<BoundValue>> From<Option<T>> for BoundValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

/// A template plus its ordered bindings, ready to hand to a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeQuery {
    template: String,
    bindings: Vec<BoundValue>,
}

impl SafeQuery {
    /// Binds `values` to the placeholders of `template`, sanitizing text.
    ///
    /// # Errors
    ///
    /// `ParameterCountMismatch` when the placeholder and value counts differ.
    pub fn bind(
        template: impl Into<String>,
        values: impl IntoIterator<Item = BoundValue>,
    ) -> Result<Self, QueryError> {
        let template = template.into();
        let bindings: Vec<BoundValue> = values.into_iter().map(BoundValue::sanitized).collect();

        let placeholders = count_placeholders(&template);
        if placeholders != bindings.len() {
            return Err(QueryError::ParameterCountMismatch {
                placeholders,
                values: bindings.len(),
            });
        }

        Ok(Self { template, bindings })
    }

    /// The template exactly as supplied.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn bindings(&self) -> &[BoundValue] {
        &self.bindings
    }

    /// Value bound to the 1-based placeholder `position`.
    #[must_use]
    pub fn binding(&self, position: usize) -> Option<&BoundValue> {
        position
            .checked_sub(1)
            .and_then(|index| self.bindings.get(index))
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Vec<BoundValue>) {
        (self.template, self.bindings)
    }
}

/// Counts `?` placeholders outside single-quoted literals.
#[must_use]
pub fn count_placeholders(template: &str) -> usize {
    let mut in_literal = false;
    let mut count = 0;
    for c in template.chars() {
        match c {
            // A doubled quote inside a literal toggles twice and stays inside.
            '\'' => in_literal = !in_literal,
            '?' if !in_literal => count += 1,
            _ => {}
        }
    }
    count
}
