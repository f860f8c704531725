//! SQL-timestamp parsing and formatting
//!
//! Constraints transport temporal operands as SQL timestamp text
//! (`YYYY-MM-DD HH:MM:SS`, optional fractional seconds). This is the fixed
//! format the evaluation engine parses with and the field-map builder formats
//! with; both sides must agree for the temporal equality fallback to work.

use chrono::NaiveDateTime;

const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SQL_TIMESTAMP_FRACTION_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse SQL timestamp text, with or without fractional seconds.
pub fn parse_sql_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, SQL_TIMESTAMP_FRACTION_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, SQL_TIMESTAMP_FORMAT))
        .ok()
}

/// Format a timestamp as SQL timestamp text (whole seconds).
pub fn format_sql_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(SQL_TIMESTAMP_FORMAT).to_string()
}
