//! Training Table Builder
//!
//! Splits engineered rows into a chronological training set and a trailing
//! validation holdout, fits the regressor and reports its validation score.

mod builder;
mod split;

pub use builder::{TrainingConfig, TrainingReport, TrainingTableBuilder, TrainingTables};
pub use split::{temporal_holdout, TemporalSplit};

use feature_engine::FeatureError;
use inference_engine::InferenceError;
use thiserror::Error;

/// Errors during training
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainingError {
    #[error("Need more than {holdout} rows for a {holdout}-row holdout, got {actual}")]
    InsufficientRows { holdout: usize, actual: usize },
    #[error("Rows are not in strictly increasing date order at index {0}")]
    Unordered(usize),
    #[error("Regressor unavailable: {0}")]
    RegressorUnavailable(String),
    #[error("Regressor did not report metric {0}")]
    MissingMetric(String),
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
