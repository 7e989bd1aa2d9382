//! Next-Day AQI Inference
//!
//! Defines the regressor collaborator interface, an explicitly owned model
//! handle, and the reconstruction of tomorrow's feature row from a short tail
//! of recent observations.

mod baseline;
mod engine;
mod handle;
mod reconstructor;
mod regressor;
mod table;

pub use baseline::{PersistenceRegressor, PersistenceTrainer};
pub use engine::{Forecast, ForecastResult, InferenceEngine};
pub use handle::{ModelHandle, StaticLoader};
pub use reconstructor::FeatureReconstructor;
pub use regressor::{
    root_mean_squared_error, Evaluation, LeaderboardEntry, ModelLoader, Regressor, Trainer,
    RMSE_METRIC,
};
pub use table::{FeatureTable, LabeledTable};

use data_validator::ValidationError;
use feature_engine::FeatureError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("Insufficient history: need at least {required} days, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Regressor unavailable: {0}")]
    RegressorUnavailable(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid output shape: expected {expected} predictions, got {actual}")]
    InvalidOutputShape { expected: usize, actual: usize },
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl InferenceError {
    /// Whether the caller supplied malformed input
    pub fn is_invalid_input(&self) -> bool {
        match self {
            InferenceError::InvalidInput(_) | InferenceError::Validation(_) => true,
            InferenceError::Feature(e) => e.is_invalid_input(),
            _ => false,
        }
    }
}
