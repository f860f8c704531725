//! Candidate field values
//!
//! `FieldValue` stands in for "whatever value the caller extracted from a
//! record field". The evaluation engine dispatches on the variant: numbers
//! compare within a fixed tolerance, temporals compare as instants, and
//! everything else compares through its textual form.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;

use crate::time::format_sql_timestamp;

/// A typed candidate value for constraint evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Missing / null field
    Null,
    /// Numeric field, widened to f64
    Number(f64),
    /// Timestamp field (naive, SQL-timestamp semantics)
    Temporal(NaiveDateTime),
    /// Text field
    Text(String),
    /// Collection field; used by the field-map builder to produce
    /// set-membership constraints
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Whether this value is the null variant
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Temporal(t) => write!(f, "{}", format_sql_timestamp(t)),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Temporal(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Temporal(value.naive_utc())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(d) => FieldValue::Number(d),
                None => FieldValue::Text(n.to_string()),
            },
            serde_json::Value::String(s) => FieldValue::Text(s),
            serde_json::Value::Bool(b) => FieldValue::Text(b.to_string()),
            serde_json::Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from).collect())
            }
            other @ serde_json::Value::Object(_) => FieldValue::Text(other.to_string()),
        }
    }
}
