//! AQI Error Types

use thiserror::Error;

/// Errors during AQI calculation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AqiError {
    /// Concentration is negative, NaN or infinite
    #[error("Invalid {pollutant} concentration: {value}")]
    InvalidInput {
        pollutant: &'static str,
        value: f64,
    },
}
