//! In-process constraint evaluation
//!
//! Evaluates a constraint against a candidate value without touching a
//! database. Comparison semantics dispatch on the candidate's runtime type:
//! numbers compare within [`EQUALITY_TOLERANCE`](super::EQUALITY_TOLERANCE),
//! timestamps compare as instants, and everything else compares through its
//! textual form. Kind/type combinations with no defined comparison evaluate
//! to false rather than erroring.

use crate::error::{ConstraintError, ConstraintResult, ScalarDomain};
use crate::time::parse_sql_timestamp;
use crate::value::FieldValue;

use super::{split_range, ComparisonKind, Constraint, EQUALITY_TOLERANCE};

impl Constraint {
    /// Whether the candidate value satisfies this constraint.
    ///
    /// Errors surface only when a comparison is actually requested against a
    /// raw value that cannot support it (an unparsable scalar, a malformed
    /// range); they are the caller's to handle, never swallowed here.
    pub fn evaluate(&self, value: &FieldValue) -> ConstraintResult<bool> {
        if self.is_match_all() {
            return Ok(true);
        }

        // Null checks run before the null short-circuit below so that
        // IsNull can actually see null candidates.
        match self.kind() {
            ComparisonKind::IsNull => return Ok(is_null_like(value)),
            ComparisonKind::IsNotNull => return Ok(!is_null_like(value)),
            _ => {}
        }

        if value.is_null() {
            return Ok(false);
        }

        match self.kind() {
            ComparisonKind::Equals => self.compare_equal(value),
            ComparisonKind::NotEquals => Ok(!self.compare_equal(value)?),
            ComparisonKind::In => self.contains(value),
            ComparisonKind::NotIn => Ok(!self.contains(value)?),
            ComparisonKind::Like => self.matches_pattern(value),
            _ => self.compare_ordered(value),
        }
    }

    fn compare_equal(&self, value: &FieldValue) -> ConstraintResult<bool> {
        let raw = self.require_value()?;
        match value {
            FieldValue::Number(candidate) => match self.cache().numeric(raw) {
                Some(bound) => Ok((bound - candidate).abs() < EQUALITY_TOLERANCE),
                // a non-numeric bound simply never equals a number
                None => Ok(false),
            },
            FieldValue::Temporal(candidate) => {
                let bound = self
                    .cache()
                    .temporal(raw)
                    .ok_or_else(|| timestamp_error(raw))?;
                Ok(bound == *candidate)
            }
            other => Ok(raw == other.to_string()),
        }
    }

    fn contains(&self, value: &FieldValue) -> ConstraintResult<bool> {
        let raw = self.require_value()?;
        match value {
            FieldValue::Number(candidate) => {
                let bounds = self.cache().numeric_set(raw, self.is_strict())?;
                Ok(bounds
                    .iter()
                    .any(|bound| (bound - candidate).abs() < EQUALITY_TOLERANCE))
            }
            FieldValue::Temporal(candidate) => {
                let bounds = self.cache().temporal_set(raw, self.is_strict())?;
                Ok(bounds.contains(candidate))
            }
            other => {
                let sorted = self.cache().string_set(raw);
                Ok(sorted.binary_search(&other.to_string()).is_ok())
            }
        }
    }

    fn matches_pattern(&self, value: &FieldValue) -> ConstraintResult<bool> {
        let raw = self.require_value()?;
        let pattern = self.cache().pattern(raw)?;
        Ok(pattern.is_match(&value.to_string()))
    }

    /// Between and the four ordering kinds. Also the landing spot for any
    /// remaining kind (notably `CaseInsensitiveLike`, which has no in-memory
    /// comparison and evaluates to false).
    fn compare_ordered(&self, value: &FieldValue) -> ConstraintResult<bool> {
        let raw = self.require_value()?;
        match value {
            FieldValue::Temporal(candidate) => {
                if self.kind() == ComparisonKind::Between {
                    // Range endpoints are parsed per call; the cache holds
                    // only the single-value temporal parse.
                    let (low, high) = split_range(raw)?;
                    let first = parse_sql_timestamp(low).ok_or_else(|| timestamp_error(low))?;
                    let last = parse_sql_timestamp(high).ok_or_else(|| timestamp_error(high))?;
                    return Ok(*candidate == first
                        || *candidate == last
                        || (*candidate > first && *candidate < last));
                }

                let bound = self
                    .cache()
                    .temporal(raw)
                    .ok_or_else(|| timestamp_error(raw))?;
                Ok(match self.kind() {
                    ComparisonKind::GreaterThan => *candidate > bound,
                    // The *-OrEqual kinds fall back to exact string equality
                    // between the raw value and the candidate's textual form;
                    // equality of instants alone does not satisfy them.
                    ComparisonKind::GreaterThanOrEqual => {
                        *candidate > bound || raw == value.to_string()
                    }
                    ComparisonKind::LessThan => *candidate < bound,
                    ComparisonKind::LessThanOrEqual => {
                        *candidate < bound || raw == value.to_string()
                    }
                    _ => false,
                })
            }
            FieldValue::Number(candidate) => {
                if self.kind() == ComparisonKind::Between {
                    let (low, high) = split_range(raw)?;
                    let lower: f64 = low.trim().parse().map_err(|_| number_error(low))?;
                    let upper: f64 = high.trim().parse().map_err(|_| number_error(high))?;
                    return Ok(*candidate >= lower && *candidate <= upper);
                }

                // Scalar ordering parses per call; only equality and set
                // membership go through the cache.
                let bound: f64 = raw.trim().parse().map_err(|_| number_error(raw))?;
                Ok(match self.kind() {
                    ComparisonKind::GreaterThan => *candidate > bound,
                    ComparisonKind::GreaterThanOrEqual => *candidate >= bound,
                    ComparisonKind::LessThan => *candidate < bound,
                    ComparisonKind::LessThanOrEqual => *candidate <= bound,
                    _ => false,
                })
            }
            FieldValue::Text(candidate) => {
                if self.kind() == ComparisonKind::Between {
                    let (low, high) = split_range(raw)?;
                    return Ok(candidate.as_str() >= low && candidate.as_str() <= high);
                }

                Ok(match self.kind() {
                    ComparisonKind::GreaterThan => candidate.as_str() > raw,
                    ComparisonKind::GreaterThanOrEqual => candidate.as_str() >= raw,
                    ComparisonKind::LessThan => candidate.as_str() < raw,
                    ComparisonKind::LessThanOrEqual => candidate.as_str() <= raw,
                    _ => false,
                })
            }
            _ => Ok(false),
        }
    }
}

/// A candidate is null-like if it is the null variant or the literal text
/// "null" (a defensive duplicate of the same check upstream extractors apply)
fn is_null_like(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null => true,
        FieldValue::Text(text) => text == "null",
        _ => false,
    }
}

fn number_error(value: &str) -> ConstraintError {
    ConstraintError::UnparsableScalar {
        value: value.to_string(),
        domain: ScalarDomain::Number,
    }
}

fn timestamp_error(value: &str) -> ConstraintError {
    ConstraintError::UnparsableScalar {
        value: value.to_string(),
        domain: ScalarDomain::Timestamp,
    }
}
