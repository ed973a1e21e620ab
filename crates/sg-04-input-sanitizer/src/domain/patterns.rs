//! Compiled detectors and the sanitizing transform.

use crate::domain::entities::{InjectionPattern, ValidationResult};
use crate::domain::errors::PatternError;
use regex::Regex;

/// Substrings (upper-case) that trigger escaping after stripping.
const ESCAPE_TRIGGERS: [&str; 15] = [
    "SELECT", "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "EXEC", "EXECUTE", "UNION",
    "OR 1=1", "AND 1=1", "--", "/*", "*/",
];

/// Every detector, compiled once, in evaluation order.
#[derive(Debug, Clone)]
pub struct PatternSet {
    detectors: Vec<(InjectionPattern, Regex)>,
}

impl PatternSet {
    /// # Errors
    ///
    /// Returns the first detector whose expression does not compile.
    pub fn compile() -> Result<Self, PatternError> {
        let detectors = InjectionPattern::ALL
            .iter()
            .map(|pattern| {
                Regex::new(pattern.expression())
                    .map(|regex| (*pattern, regex))
                    .map_err(|source| PatternError {
                        index: pattern.index(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { detectors })
    }

    /// First detector matching `input`. Empty input is always safe.
    #[must_use]
    pub fn check(&self, input: &str) -> ValidationResult {
        if input.is_empty() {
            return ValidationResult::Safe;
        }
        self.detectors
            .iter()
            .find(|(_, regex)| regex.is_match(input))
            .map_or(ValidationResult::Safe, |(pattern, _)| {
                ValidationResult::Rejected(*pattern)
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

/// Strips `'`, `;`, `"` and `-`, then escapes if anything keyword-like remains.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let stripped: String = input
        .chars()
        .filter(|c| !matches!(c, '\'' | ';' | '"' | '-'))
        .collect();

    if contains_escape_trigger(&stripped) {
        escape(&stripped)
    } else {
        stripped
    }
}

fn contains_escape_trigger(input: &str) -> bool {
    let upper = input.to_uppercase();
    ESCAPE_TRIGGERS.iter().any(|keyword| upper.contains(keyword))
}

fn escape(input: &str) -> String {
    input
        .replace('\'', "''")
        .replace("--", "")
        .replace("/*", "")
        .replace("*/", "")
        .replace(';', "")
}
