//! Error types for constraint evaluation and SQL emission
//!
//! Every failure here is a local, synchronous usage error reported to the
//! immediate caller; there is no transient or retryable class and nothing is
//! logged and swallowed.

use std::fmt;

use crate::constraint::ComparisonKind;

/// Result type alias for constraint operations
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Scalar domain a raw value failed to parse into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarDomain {
    Number,
    Timestamp,
}

/// Error types for constraint operations
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintError {
    /// A between value did not split into exactly two tokens
    MalformedRange(String),
    /// The raw value could not be parsed as the requested scalar domain
    UnparsableScalar { value: String, domain: ScalarDomain },
    /// A like pattern did not compile to a valid regular expression
    InvalidPattern(String),
    /// In / not-in emission found zero list elements
    EmptySet,
    /// The constraint has no raw value but the operation requires one
    MissingValue(ComparisonKind),
    /// SQL emission requested for a kind with no mapping. Unreachable under
    /// the closed enumeration; kept as a hard error rather than a fallback.
    UnsupportedKind(ComparisonKind),
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintError::MalformedRange(value) => {
                write!(f, "Invalid between constraint: {}", value)
            }
            ConstraintError::UnparsableScalar { value, domain } => match domain {
                ScalarDomain::Number => {
                    write!(f, "Constraint does not appear to be a number: {}", value)
                }
                ScalarDomain::Timestamp => write!(
                    f,
                    "Constraint does not appear to be a date: {} (expected a SQL timestamp)",
                    value
                ),
            },
            ConstraintError::InvalidPattern(pattern) => {
                write!(f, "Invalid like pattern: {}", pattern)
            }
            ConstraintError::EmptySet => {
                write!(f, "Invalid constraint value: no list elements")
            }
            ConstraintError::MissingValue(kind) => {
                write!(f, "Constraint of kind '{}' has no value", kind)
            }
            ConstraintError::UnsupportedKind(kind) => {
                write!(f, "Invalid constraint type: {}", kind)
            }
        }
    }
}

impl std::error::Error for ConstraintError {}
