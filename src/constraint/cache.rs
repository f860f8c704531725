//! Memoized per-domain parses of a constraint's raw value
//!
//! A constraint is typically evaluated against many candidate records, so the
//! raw string is parsed at most once per target domain. Slots are write-once
//! (`OnceCell`), which makes concurrent readers safe: a reader either sees no
//! entry or a fully-published parse, never a partial one. Invalidation is
//! total: mutators replace the whole cache with a fresh one.

use chrono::NaiveDateTime;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::{ConstraintError, ConstraintResult, ScalarDomain};
use crate::time::parse_sql_timestamp;

use super::split_values;

/// Lazily-populated parse slots, one per target domain
#[derive(Debug, Default)]
pub(crate) struct ValueCache {
    numeric: OnceCell<Option<f64>>,
    temporal: OnceCell<Option<NaiveDateTime>>,
    numeric_set: OnceCell<Vec<f64>>,
    temporal_set: OnceCell<Vec<NaiveDateTime>>,
    string_set: OnceCell<Vec<String>>,
    pattern: OnceCell<Regex>,
}

// A cloned constraint starts with an empty cache.
impl Clone for ValueCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl ValueCache {
    /// Decimal parse of the raw value; `None` if it is not numeric
    pub fn numeric(&self, raw: &str) -> Option<f64> {
        *self.numeric.get_or_init(|| raw.trim().parse().ok())
    }

    /// SQL-timestamp parse of the raw value; `None` if it is not a timestamp
    pub fn temporal(&self, raw: &str) -> Option<NaiveDateTime> {
        *self.temporal.get_or_init(|| parse_sql_timestamp(raw))
    }

    /// Element-wise decimal parse of the comma-joined raw value. Lenient
    /// mode skips unparsable elements; strict mode surfaces them.
    pub fn numeric_set(&self, raw: &str, strict: bool) -> ConstraintResult<&[f64]> {
        if let Some(parsed) = self.numeric_set.get() {
            return Ok(parsed);
        }
        let mut parsed = Vec::new();
        for element in split_values(raw) {
            match element.trim().parse::<f64>() {
                Ok(number) => parsed.push(number),
                Err(_) if !strict => continue,
                Err(_) => {
                    return Err(ConstraintError::UnparsableScalar {
                        value: element.to_string(),
                        domain: ScalarDomain::Number,
                    })
                }
            }
        }
        Ok(self.numeric_set.get_or_init(|| parsed))
    }

    /// Element-wise timestamp parse of the comma-joined raw value, with the
    /// same lenient/strict policy as [`ValueCache::numeric_set`]
    pub fn temporal_set(&self, raw: &str, strict: bool) -> ConstraintResult<&[NaiveDateTime]> {
        if let Some(parsed) = self.temporal_set.get() {
            return Ok(parsed);
        }
        let mut parsed = Vec::new();
        for element in split_values(raw) {
            match parse_sql_timestamp(element) {
                Some(timestamp) => parsed.push(timestamp),
                None if !strict => continue,
                None => {
                    return Err(ConstraintError::UnparsableScalar {
                        value: element.to_string(),
                        domain: ScalarDomain::Timestamp,
                    })
                }
            }
        }
        Ok(self.temporal_set.get_or_init(|| parsed))
    }

    /// The comma-joined raw value as a lexicographically sorted list,
    /// enabling binary search during membership tests. Insertion order is
    /// not preserved.
    pub fn string_set(&self, raw: &str) -> &[String] {
        self.string_set.get_or_init(|| {
            let mut elements: Vec<String> =
                split_values(raw).into_iter().map(str::to_string).collect();
            elements.sort_unstable();
            elements
        })
    }

    /// Compiled full-match pattern for `Like`: `%` becomes `.*`, everything
    /// else is taken as-is (regex metacharacters stay live)
    pub fn pattern(&self, raw: &str) -> ConstraintResult<&Regex> {
        if let Some(pattern) = self.pattern.get() {
            return Ok(pattern);
        }
        let compiled = Regex::new(&format!("^(?:{})$", raw.replace('%', ".*")))
            .map_err(|_| ConstraintError::InvalidPattern(raw.to_string()))?;
        Ok(self.pattern.get_or_init(|| compiled))
    }
}
