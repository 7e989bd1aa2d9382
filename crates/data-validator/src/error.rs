//! Validation Error Types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors during observation validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} on {date} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        date: NaiveDate,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite value
    #[error("{field} value on {date} is not finite")]
    NonFinite { field: &'static str, date: NaiveDate },

    /// Dates are not strictly increasing
    #[error("Date {next} does not follow {previous}")]
    DateOrder {
        previous: NaiveDate,
        next: NaiveDate,
    },

    /// Calendar days missing between two observations
    #[error("{missing_days} day(s) missing after {after}")]
    DateGap { after: NaiveDate, missing_days: i64 },

    /// Raw source lacks a required column
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// No observations supplied
    #[error("Observation sequence is empty")]
    Empty,
}
