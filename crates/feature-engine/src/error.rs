//! Feature Engineering Error Types

use aqi_index::AqiError;
use data_validator::ValidationError;
use thiserror::Error;

/// Errors during feature engineering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Fewer days than the rolling window and target require
    #[error("Insufficient history: need at least {required} days, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// Malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Schema names a column that cannot be produced
    #[error("Missing expected feature column: {0}")]
    MissingColumn(String),

    /// Two schemas disagree on columns or their order
    #[error("Feature schema mismatch: expected {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error(transparent)]
    Aqi(#[from] AqiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl FeatureError {
    /// Whether the error is an invalid-input failure (as opposed to too little history)
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, FeatureError::InsufficientHistory { .. })
    }
}
