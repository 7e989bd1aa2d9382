//! Persistence Baseline Regressor
//!
//! Predicts tomorrow's AQI as today's AQI, recomputed from the row's `pm25`
//! and `o3` columns, plus the mean next-day change seen in training. Runs the
//! whole pipeline without the external regression engine.

use crate::regressor::{
    root_mean_squared_error, Evaluation, LeaderboardEntry, Regressor, Trainer, RMSE_METRIC,
};
use crate::table::{FeatureTable, LabeledTable};
use crate::InferenceError;
use aqi_index::overall_aqi;
use feature_engine::{Feature, FeatureError, FeatureSchema};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Same-day AQI for every row of a table
fn same_day_aqi(table: &FeatureTable) -> Result<Vec<f64>, InferenceError> {
    let column = |feature: Feature| {
        table
            .column(feature.name())
            .ok_or_else(|| FeatureError::MissingColumn(feature.name().to_string()))
    };
    let pm25 = column(Feature::Pm25)?;
    let o3 = column(Feature::O3)?;

    pm25.iter()
        .zip(&o3)
        .map(|(&pm25, &o3)| {
            overall_aqi(pm25, o3)
                .map(|a| f64::from(a.value))
                .map_err(|e| InferenceError::from(FeatureError::from(e)))
        })
        .collect()
}

/// Fits [`PersistenceRegressor`]s
#[derive(Debug, Clone, Default)]
pub struct PersistenceTrainer;

impl Trainer for PersistenceTrainer {
    type Model = PersistenceRegressor;

    fn fit(&self, table: &LabeledTable) -> Result<PersistenceRegressor, InferenceError> {
        if table.is_empty() {
            return Err(InferenceError::InvalidInput("cannot fit on an empty table".into()));
        }

        let today = same_day_aqi(table.features())?;
        let bias = today
            .iter()
            .zip(table.targets())
            .map(|(t, target)| target - t)
            .sum::<f64>()
            / table.len() as f64;

        info!(
            "Fitted persistence baseline on {} rows (bias={:.3})",
            table.len(),
            bias
        );
        Ok(PersistenceRegressor {
            schema: table.features().schema().clone(),
            bias,
        })
    }
}

/// Persistence forecast with a learned offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceRegressor {
    schema: FeatureSchema,
    bias: f64,
}

impl PersistenceRegressor {
    /// Create a regressor directly from a schema and offset
    pub fn new(schema: FeatureSchema, bias: f64) -> Self {
        Self { schema, bias }
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn predict_with_bias(
        &self,
        table: &FeatureTable,
        bias: f64,
    ) -> Result<Vec<f64>, InferenceError> {
        self.schema.ensure_matches(table.schema())?;
        let predictions: Vec<f64> = same_day_aqi(table)?.into_iter().map(|a| a + bias).collect();
        debug!("Predicted {} rows", predictions.len());
        Ok(predictions)
    }

    fn score(&self, table: &LabeledTable, bias: f64) -> Result<f64, InferenceError> {
        let predicted = self.predict_with_bias(table.features(), bias)?;
        root_mean_squared_error(&predicted, table.targets())
            .ok_or_else(|| InferenceError::InvalidInput("cannot evaluate an empty table".into()))
    }
}

impl Regressor for PersistenceRegressor {
    fn feature_schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>, InferenceError> {
        self.predict_with_bias(table, self.bias)
    }

    fn evaluate(&self, table: &LabeledTable) -> Result<Evaluation, InferenceError> {
        let rmse = self.score(table, self.bias)?;
        Ok(Evaluation::from([(RMSE_METRIC.to_string(), rmse)]))
    }

    fn leaderboard(&self, table: &LabeledTable) -> Option<Vec<LeaderboardEntry>> {
        let candidates = [("PersistenceWithBias", self.bias), ("Persistence", 0.0)];
        let mut entries: Vec<LeaderboardEntry> = candidates
            .into_iter()
            .filter_map(|(model, bias)| {
                self.score(table, bias).ok().map(|score| LeaderboardEntry {
                    model: model.to_string(),
                    score,
                })
            })
            .collect();
        entries.sort_by(|a, b| a.score.total_cmp(&b.score));
        Some(entries)
    }
}
