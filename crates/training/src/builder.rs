//! Training Table Assembly

use crate::split::temporal_holdout;
use crate::TrainingError;
use chrono::NaiveDate;
use data_validator::DailyObservation;
use feature_engine::{FeatureEngineer, FeatureSchema, TrainingRow};
use inference_engine::{
    Evaluation, LabeledTable, LeaderboardEntry, Regressor, Trainer, RMSE_METRIC,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Trailing rows held out for validation
    pub holdout_days: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self { holdout_days: 14 }
    }
}

/// Schema-labeled train and validation tables
#[derive(Debug, Clone)]
pub struct TrainingTables {
    pub train: LabeledTable,
    pub validation: LabeledTable,
    /// First and last date of the training rows
    pub train_range: (NaiveDate, NaiveDate),
    /// First and last date of the validation rows
    pub validation_range: (NaiveDate, NaiveDate),
}

/// Outcome of a training run. Metrics come from the regressor as-is.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub schema: FeatureSchema,
    pub target_column: String,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub train_range: (NaiveDate, NaiveDate),
    pub validation_range: (NaiveDate, NaiveDate),
    /// Validation root-mean-squared error
    pub rmse: f64,
    pub evaluation: Evaluation,
    pub leaderboard: Option<Vec<LeaderboardEntry>>,
}

fn date_range(rows: &[TrainingRow]) -> Option<(NaiveDate, NaiveDate)> {
    Some((rows.first()?.date(), rows.last()?.date()))
}

/// Builds training tables and runs the regressor on them
#[derive(Debug, Clone, Default)]
pub struct TrainingTableBuilder {
    config: TrainingConfig,
    engineer: FeatureEngineer,
    schema: FeatureSchema,
}

impl TrainingTableBuilder {
    /// Create a new builder
    pub fn new(config: TrainingConfig, engineer: FeatureEngineer, schema: FeatureSchema) -> Self {
        info!(
            "Creating training table builder: holdout={} days, schema v{} ({} columns)",
            config.holdout_days,
            schema.version(),
            schema.len()
        );
        Self {
            config,
            engineer,
            schema,
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Engineer observations and split them into tables
    pub fn build(
        &self,
        observations: &[DailyObservation],
    ) -> Result<TrainingTables, TrainingError> {
        let rows = self.engineer.training_rows(observations)?;
        self.tables_from_rows(&rows)
    }

    /// Split already engineered rows into tables
    pub fn tables_from_rows(&self, rows: &[TrainingRow]) -> Result<TrainingTables, TrainingError> {
        let split = temporal_holdout(rows, self.config.holdout_days)?;
        let (Some(train_range), Some(validation_range)) =
            (date_range(&split.train), date_range(&split.validation))
        else {
            return Err(TrainingError::InsufficientRows {
                holdout: self.config.holdout_days,
                actual: rows.len(),
            });
        };

        Ok(TrainingTables {
            train: LabeledTable::from_rows(&self.schema, &split.train)?,
            validation: LabeledTable::from_rows(&self.schema, &split.validation)?,
            train_range,
            validation_range,
        })
    }

    /// Build tables from observations, fit and evaluate
    pub fn train<T: Trainer>(
        &self,
        trainer: &T,
        observations: &[DailyObservation],
    ) -> Result<(T::Model, TrainingReport), TrainingError> {
        let tables = self.build(observations)?;
        self.fit_and_evaluate(trainer, &tables)
    }

    /// Fit on the training table and score on the validation table
    pub fn fit_and_evaluate<T: Trainer>(
        &self,
        trainer: &T,
        tables: &TrainingTables,
    ) -> Result<(T::Model, TrainingReport), TrainingError> {
        info!(
            "Fitting on {} rows ({} .. {}), validating on {} rows",
            tables.train.len(),
            tables.train_range.0,
            tables.train_range.1,
            tables.validation.len()
        );

        let model = trainer.fit(&tables.train).map_err(|e| {
            if e.is_invalid_input() {
                TrainingError::Inference(e)
            } else {
                TrainingError::RegressorUnavailable(e.to_string())
            }
        })?;
        self.schema.ensure_matches(model.feature_schema())?;

        let evaluation = model.evaluate(&tables.validation)?;
        let rmse = *evaluation
            .get(RMSE_METRIC)
            .ok_or_else(|| TrainingError::MissingMetric(RMSE_METRIC.to_string()))?;
        let leaderboard = model.leaderboard(&tables.validation);
        if leaderboard.is_none() {
            warn!("Regressor exposes no leaderboard");
        }

        info!("Validation RMSE: {:.2}", rmse);
        let report = TrainingReport {
            schema: self.schema.clone(),
            target_column: tables.train.target_column().to_string(),
            train_rows: tables.train.len(),
            validation_rows: tables.validation.len(),
            train_range: tables.train_range,
            validation_range: tables.validation_range,
            rmse,
            evaluation,
            leaderboard,
        };
        Ok((model, report))
    }
}

