//! SQL fragment emission
//!
//! Renders a constraint as the text that goes between a column name and the
//! rest of a statement. The padding convention (one leading and one trailing
//! space) is load-bearing: downstream query builders concatenate these
//! fragments directly, so the emitted bytes must be reproducible exactly.
//!
//! No SQL escaping is applied to interpolated values. The consuming query
//! layer owns injection defense; adding escaping here would silently break
//! wire compatibility with it.

use crate::error::{ConstraintError, ConstraintResult};

use super::{split_range, split_values, ComparisonKind, Constraint};

impl Constraint {
    /// Render this constraint as an SQL fragment
    pub fn to_sql(&self) -> ConstraintResult<String> {
        match self.kind() {
            ComparisonKind::Equals
            | ComparisonKind::GreaterThan
            | ComparisonKind::GreaterThanOrEqual
            | ComparisonKind::LessThan
            | ComparisonKind::LessThanOrEqual
            | ComparisonKind::Like
            | ComparisonKind::CaseInsensitiveLike => Ok(format!(
                " {} '{}' ",
                self.kind().operand(),
                self.require_value()?
            )),
            // SQL-standard inequality operator, not the declared operand
            ComparisonKind::NotEquals => Ok(format!(" <> '{}' ", self.require_value()?)),
            ComparisonKind::In => self.set_membership_sql(true),
            ComparisonKind::NotIn => self.set_membership_sql(false),
            ComparisonKind::Between => {
                let (low, high) = split_range(self.require_value()?)?;
                Ok(format!(" between '{}' and '{}' ", low, high))
            }
            ComparisonKind::IsNull => Ok(" is null ".to_string()),
            ComparisonKind::IsNotNull => Ok(" is not null ".to_string()),
        }
    }

    fn set_membership_sql(&self, in_set: bool) -> ConstraintResult<String> {
        let raw = self.require_value()?;
        let elements = split_values(raw);
        if elements.is_empty() {
            return Err(ConstraintError::EmptySet);
        }
        let mut sql = String::new();
        if !in_set {
            sql.push_str(" not");
        }
        sql.push_str(" in (");
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                sql.push(',');
            }
            sql.push('\'');
            sql.push_str(element);
            sql.push('\'');
        }
        sql.push_str(") ");
        Ok(sql)
    }
}
