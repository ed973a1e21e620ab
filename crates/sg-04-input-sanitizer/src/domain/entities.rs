//! Detector identities and validation results.

use shared_types::SecurityError;
use std::fmt;

/// The closed set of injection detectors, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InjectionPattern {
    /// `'`, `--`, `;`, `<`, `>`
    DangerousCharacters,
    /// SQL verbs as whole words.
    StatementKeyword,
    /// Whole word `OR` followed later by `=`.
    OrTautology,
    /// Whole word `AND` followed later by `=`.
    AndTautology,
    /// Whole word `UNION`.
    Union,
}

impl InjectionPattern {
    pub const ALL: [InjectionPattern; 5] = [
        Self::DangerousCharacters,
        Self::StatementKeyword,
        Self::OrTautology,
        Self::AndTautology,
        Self::Union,
    ];

    /// Position in the evaluation order.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::DangerousCharacters => 0,
            Self::StatementKeyword => 1,
            Self::OrTautology => 2,
            Self::AndTautology => 3,
            Self::Union => 4,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Case-insensitive expression implementing the detector.
    #[must_use]
    pub fn expression(&self) -> &'static str {
        match self {
            Self::DangerousCharacters => r"(?i)('|(--)|(;)|(<)|(>))",
            Self::StatementKeyword => {
                r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|EXECUTE)\b"
            }
            Self::OrTautology => r"(?i)\bOR\b.*=.*",
            Self::AndTautology => r"(?i)\bAND\b.*=.*",
            Self::Union => r"(?i)\bUNION\b",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DangerousCharacters => "DANGEROUS_CHARACTERS",
            Self::StatementKeyword => "STATEMENT_KEYWORD",
            Self::OrTautology => "OR_TAUTOLOGY",
            Self::AndTautology => "AND_TAUTOLOGY",
            Self::Union => "UNION",
        }
    }
}

impl fmt::Display for InjectionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name(), self.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Safe,
    /// The first detector that matched.
    Rejected(InjectionPattern),
}

impl ValidationResult {
    #[must_use]
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }

    /// Index of the matching detector, if rejected.
    #[must_use]
    pub fn pattern_index(&self) -> Option<usize> {
        match self {
            Self::Safe => None,
            Self::Rejected(pattern) => Some(pattern.index()),
        }
    }

    /// # Errors
    ///
    /// `Rejected` becomes `SecurityError::ValidationRejected`.
    pub fn into_result(self) -> Result<(), SecurityError> {
        match self {
            Self::Safe => Ok(()),
            Self::Rejected(pattern) => Err(SecurityError::ValidationRejected {
                pattern_index: pattern.index(),
            }),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => f.write_str("SAFE"),
            Self::Rejected(pattern) => write!(f, "REJECTED({pattern})"),
        }
    }
}
