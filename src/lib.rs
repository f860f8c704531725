//! # dataquery: request-constraint engine
//!
//! A `Constraint` is a single filtering condition (equals, range, set
//! membership, pattern or null-check) stored in a string-encoded,
//! wire-transportable form. Constraints are built up front (often before any
//! schema information is available), keyed by field name, and then used two
//! ways: evaluated in-process against candidate record values, or rendered as
//! SQL fragments for a downstream query builder.
//!
//! The engine performs no I/O; everything here is synchronous, in-memory
//! computation over value objects.

pub mod constraint;
pub mod error;
pub mod mapping;
pub mod time;
pub mod value;


// Re-export core types
pub use constraint::{ComparisonKind, Constraint};
pub use error::{ConstraintError, ConstraintResult};
pub use mapping::{to_constraint_mapping, to_constraint_mapping_exclude_null};
pub use value::FieldValue;
