//! Field-map to constraint-map construction
//!
//! Builds a constraint per field from an example set of field values: null
//! fields become null-checks, collections become set membership, timestamps
//! are formatted with the fixed SQL-timestamp routine, and everything else
//! becomes an equality constraint on its textual form.

use std::collections::HashMap;

use tracing::trace;

use crate::constraint::{ComparisonKind, Constraint};
use crate::time::format_sql_timestamp;
use crate::value::FieldValue;

/// Build a constraint mapping from a field mapping, including null fields as
/// `IsNull` constraints
pub fn to_constraint_mapping(fields: &HashMap<String, FieldValue>) -> HashMap<String, Constraint> {
    build(fields, true)
}

/// Same as [`to_constraint_mapping`], except null-valued fields are dropped
/// from the result entirely
pub fn to_constraint_mapping_exclude_null(
    fields: &HashMap<String, FieldValue>,
) -> HashMap<String, Constraint> {
    build(fields, false)
}

fn build(fields: &HashMap<String, FieldValue>, include_nulls: bool) -> HashMap<String, Constraint> {
    let mut constraints = HashMap::new();
    for (field, value) in fields {
        let constraint = match value {
            FieldValue::Null => {
                if !include_nulls {
                    trace!(field = field.as_str(), "dropping null field from constraint mapping");
                    continue;
                }
                Constraint::new(ComparisonKind::IsNull)
            }
            FieldValue::List(elements) => {
                // Nulls inside a collection are skipped, not stringified
                let elements: Vec<String> = elements
                    .iter()
                    .filter(|element| !element.is_null())
                    .map(ToString::to_string)
                    .collect();
                Constraint::in_list(elements)
            }
            FieldValue::Temporal(timestamp) => Constraint::equals(format_sql_timestamp(timestamp)),
            other => Constraint::equals(other.to_string()),
        };
        constraints.insert(field.clone(), constraint);
    }
    constraints
}
