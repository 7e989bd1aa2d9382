//! Regressor Collaborator Interface
//!
//! The regression engine is external. These traits describe what the pipeline
//! needs from it: fitting, prediction, evaluation and the feature schema a
//! fitted model expects.

use crate::table::{FeatureTable, LabeledTable};
use crate::InferenceError;
use feature_engine::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric name reported by evaluation
pub const RMSE_METRIC: &str = "root_mean_squared_error";

/// Metric name to value
pub type Evaluation = BTreeMap<String, f64>;

/// One ranked entry of a model leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub model: String,
    /// Validation score (lower is better)
    pub score: f64,
}

/// A fitted model
pub trait Regressor {
    /// Ordered columns the model was fit on
    fn feature_schema(&self) -> &FeatureSchema;

    /// Predict one value per row
    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>, InferenceError>;

    /// Score the model on labeled rows
    fn evaluate(&self, table: &LabeledTable) -> Result<Evaluation, InferenceError>;

    /// Ranked candidate models, if the engine exposes one
    fn leaderboard(&self, _table: &LabeledTable) -> Option<Vec<LeaderboardEntry>> {
        None
    }
}

/// Fits a regressor on a labeled table
pub trait Trainer {
    type Model: Regressor;

    fn fit(&self, table: &LabeledTable) -> Result<Self::Model, InferenceError>;
}

/// Loads a previously fitted model artifact
pub trait ModelLoader {
    type Model: Regressor;

    fn load(&self) -> Result<Self::Model, InferenceError>;

    /// Human-readable source of the model, for logs
    fn describe(&self) -> String;
}

/// Root-mean-squared error, `None` for empty or mismatched inputs
pub fn root_mean_squared_error(predicted: &[f64], actual: &[f64]) -> Option<f64> {
    if predicted.is_empty() || predicted.len() != actual.len() {
        return None;
    }
    let sum: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a) * (p - a))
        .sum();
    Some((sum / predicted.len() as f64).sqrt())
}
