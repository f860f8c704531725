//! Core constraint entity
//!
//! A `Constraint` couples a comparison kind with a string-encoded raw value.
//! The raw value stays untyped until evaluation or emission time: scalar
//! kinds hold a single value, `In`/`NotIn` hold a comma-joined list, and
//! `Between` holds a `--`-joined pair. Per-type parses of the raw value are
//! memoized in a cache that is cleared on every mutation.

pub(crate) mod cache;
pub mod evaluate;
pub mod sql;

use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConstraintError, ConstraintResult};
use cache::ValueCache;

/// Tolerance for numeric equality and set membership. Fixed, not relative;
/// callers needing different precision must pre-round.
pub const EQUALITY_TOLERANCE: f64 = 0.0001;

/// List separator: comma optionally followed by one whitespace character.
static IN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s?").unwrap());

/// Comparison operators a constraint can apply, each carrying its canonical
/// SQL operand text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonKind {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Between,
    In,
    NotIn,
    Like,
    CaseInsensitiveLike,
    IsNull,
    IsNotNull,
}

impl ComparisonKind {
    /// Canonical SQL operand text for this kind
    pub fn operand(&self) -> &'static str {
        match self {
            ComparisonKind::Equals => "=",
            ComparisonKind::NotEquals => "!=",
            ComparisonKind::GreaterThan => ">",
            ComparisonKind::GreaterThanOrEqual => ">=",
            ComparisonKind::LessThan => "<",
            ComparisonKind::LessThanOrEqual => "<=",
            ComparisonKind::Between => "between",
            ComparisonKind::In => "in",
            ComparisonKind::NotIn => "not in",
            ComparisonKind::Like => "like",
            ComparisonKind::CaseInsensitiveLike => "ilike",
            ComparisonKind::IsNull => "isnull",
            ComparisonKind::IsNotNull => "isnotnull",
        }
    }

    fn is_mergeable(&self) -> bool {
        matches!(self, ComparisonKind::Equals | ComparisonKind::In)
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operand())
    }
}

/// A single filtering condition: comparison kind plus string-encoded value
///
/// Identity (equality and hashing) covers only `(kind, value)`; the parse
/// cache and the predicate flags never participate. The serialized wire form
/// is likewise restricted to `kind` and `value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    kind: ComparisonKind,
    #[serde(default)]
    value: Option<String>,
    /// Set only by [`Constraint::match_all`]; a structurally identical
    /// like-% constraint does not short-circuit evaluation.
    #[serde(skip)]
    wildcard: bool,
    /// Opt-in: fail loudly on unparsable set elements instead of skipping
    #[serde(skip)]
    strict: bool,
    #[serde(skip)]
    cache: ValueCache,
}

impl Constraint {
    /// Create a constraint of the given kind with no value
    pub fn new(kind: ComparisonKind) -> Self {
        Self {
            kind,
            value: None,
            wildcard: false,
            strict: false,
            cache: ValueCache::default(),
        }
    }

    /// Create an equals constraint on the given value
    pub fn equals(value: impl Into<String>) -> Self {
        Self::with_value(ComparisonKind::Equals, value)
    }

    /// Create a constraint of the given kind and value
    pub fn with_value(kind: ComparisonKind, value: impl Into<String>) -> Self {
        let mut constraint = Self::new(kind);
        constraint.value = Some(value.into());
        constraint
    }

    /// Create an `In` constraint over the given values. A single-element
    /// list degrades to `Equals`; a list is never stored with one element.
    pub fn in_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_list(values, true)
    }

    /// Create a `NotIn` constraint over the given values, degrading a
    /// single-element list to `NotEquals`.
    pub fn not_in_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_list(values, false)
    }

    /// Create a set-membership constraint (`in` selects `In`/`Equals`,
    /// otherwise `NotIn`/`NotEquals`)
    pub fn from_list<I, S>(values: I, in_set: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        if values.len() == 1 {
            let kind = if in_set {
                ComparisonKind::Equals
            } else {
                ComparisonKind::NotEquals
            };
            let mut constraint = Self::new(kind);
            constraint.value = values.into_iter().next();
            constraint
        } else {
            let kind = if in_set {
                ComparisonKind::In
            } else {
                ComparisonKind::NotIn
            };
            Self::with_value(kind, values.join(","))
        }
    }

    /// Create a `Between` constraint over the closed range `[low, high]`
    pub fn between(low: impl AsRef<str>, high: impl AsRef<str>) -> Self {
        Self::with_value(
            ComparisonKind::Between,
            format!("{}--{}", low.as_ref(), high.as_ref()),
        )
    }

    /// The sentinel constraint that accepts every candidate, including null.
    /// Only constraints produced here short-circuit; a structurally equal
    /// like-% constraint evaluates normally.
    pub fn match_all() -> Self {
        let mut constraint = Self::with_value(ComparisonKind::Like, "%");
        constraint.wildcard = true;
        constraint
    }

    /// The comparison kind
    pub fn kind(&self) -> ComparisonKind {
        self.kind
    }

    /// The raw string-encoded value, if any
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether this constraint is the match-all sentinel
    pub fn is_match_all(&self) -> bool {
        self.wildcard
    }

    /// Whether set parses fail loudly on unparsable elements
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Replace the comparison kind, keeping the raw value
    pub fn set_kind(&mut self, kind: ComparisonKind) {
        self.kind = kind;
    }

    /// Replace the raw value. All cached parses are cleared before this
    /// returns; a later evaluation never observes a pre-mutation parse.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.cache = ValueCache::default();
        self.value = Some(value.into());
    }

    /// Replace the raw value with a comma-joined list. The kind is left
    /// unchanged; degrading to `Equals` happens only at construction.
    pub fn set_value_list<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.set_value(joined);
    }

    /// Append one value to the comma-joined list
    pub fn add_to_value_list(&mut self, value: &str) {
        match self.value.take() {
            Some(current) => self.set_value(format!("{},{}", current, value)),
            None => self.set_value(value),
        }
    }

    /// Replace the raw value with a `--`-joined range pair
    pub fn set_between_values(&mut self, low: impl AsRef<str>, high: impl AsRef<str>) {
        self.set_value(format!("{}--{}", low.as_ref(), high.as_ref()));
    }

    /// Switch set parsing between lenient (skip unparsable elements, the
    /// default) and strict (surface them as errors). Cached set parses were
    /// produced under the previous policy, so they are cleared too.
    pub fn set_strict(&mut self, strict: bool) {
        if self.strict != strict {
            self.cache = ValueCache::default();
        }
        self.strict = strict;
    }

    /// Fold another equality or set constraint into this one, upgrading
    /// `Equals` to `In`. Returns false without mutating for any kind outside
    /// the `{Equals, In}` family; `NotEquals`/`NotIn` are a distinct,
    /// non-mergeable family.
    pub fn merge(&mut self, other: &Constraint) -> bool {
        if !self.kind.is_mergeable() || !other.kind.is_mergeable() {
            tracing::debug!(
                left = %self.kind,
                right = %other.kind,
                "refusing to merge non-mergeable constraint kinds"
            );
            return false;
        }
        if self.kind == ComparisonKind::Equals {
            self.kind = ComparisonKind::In;
        }
        if let Some(value) = other.value.as_deref() {
            self.add_to_value_list(value);
        }
        true
    }

    pub(crate) fn require_value(&self) -> ConstraintResult<&str> {
        self.value
            .as_deref()
            .ok_or(ConstraintError::MissingValue(self.kind))
    }

    pub(crate) fn cache(&self) -> &ValueCache {
        &self.cache
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.value.as_deref().unwrap_or("null"))
    }
}

/// Split a comma-joined list value. Trailing empty tokens are dropped, but a
/// value the separator never matched comes back whole: `",,"` yields no
/// elements while `""` yields one empty element.
pub(crate) fn split_values(raw: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = IN_SPLIT.split(raw).collect();
    if parts.len() > 1 {
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
    }
    parts
}

/// Split a `--`-joined range value into exactly two tokens
pub(crate) fn split_range(raw: &str) -> ConstraintResult<(&str, &str)> {
    let mut parts: Vec<&str> = raw.split("--").collect();
    if parts.len() > 1 {
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
    }
    if parts.len() != 2 {
        return Err(ConstraintError::MalformedRange(raw.to_string()));
    }
    Ok((parts[0], parts[1]))
}
