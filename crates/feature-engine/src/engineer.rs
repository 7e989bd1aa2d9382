//! Batch Feature Engineer

use crate::features::{FeatureVector, TrainingRow};
use crate::rolling::{lagged_window, RollingMeans, ROLLING_WINDOW};
use crate::FeatureError;
use aqi_index::overall_aqi;
use data_validator::{DailyObservation, Validator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Minimum days for training: a full rolling window plus one day to label
pub const MIN_TRAINING_DAYS: usize = ROLLING_WINDOW + 1;

/// Feature engineering configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Drop training rows whose lagged window has fewer than seven days.
    /// Off by default: only the first day, which has no prior day, is dropped.
    pub require_full_window: bool,
}

/// One engineered day, labeled when the following day is known
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineeredRow {
    pub features: FeatureVector,
    /// Same-day AQI
    pub aqi: u16,
    /// AQI of the following day; `None` for the last day
    pub target_aqi: Option<u16>,
}

/// Turns ordered daily observations into feature rows
#[derive(Debug, Clone, Default)]
pub struct FeatureEngineer {
    config: FeatureConfig,
    validator: Validator,
}

impl FeatureEngineer {
    /// Create a new feature engineer
    pub fn new(config: FeatureConfig, validator: Validator) -> Self {
        info!("Creating feature engineer with config: {:?}", config);
        Self { config, validator }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Engineer every day that has at least one prior day.
    ///
    /// The last day is kept with `target_aqi: None`.
    pub fn transform(
        &self,
        observations: &[DailyObservation],
    ) -> Result<Vec<EngineeredRow>, FeatureError> {
        self.validator.validate_sequence(observations)?;

        let aqi = observations
            .iter()
            .map(|o| overall_aqi(o.pm25, o.o3).map(|a| a.value))
            .collect::<Result<Vec<u16>, _>>()?;

        let rows: Vec<EngineeredRow> = observations
            .iter()
            .enumerate()
            .filter_map(|(i, obs)| {
                let rolling = RollingMeans::over(&observations[lagged_window(i, ROLLING_WINDOW)])?;
                Some(EngineeredRow {
                    features: FeatureVector::assemble(obs.date, obs, rolling),
                    aqi: aqi[i],
                    target_aqi: aqi.get(i + 1).copied(),
                })
            })
            .collect();

        debug!(
            "Engineered {} rows from {} observations",
            rows.len(),
            observations.len()
        );
        Ok(rows)
    }

    /// Engineer labeled training rows, ordered by date
    pub fn training_rows(
        &self,
        observations: &[DailyObservation],
    ) -> Result<Vec<TrainingRow>, FeatureError> {
        if observations.len() < MIN_TRAINING_DAYS {
            return Err(FeatureError::InsufficientHistory {
                required: MIN_TRAINING_DAYS,
                actual: observations.len(),
            });
        }

        let rows: Vec<TrainingRow> = self
            .transform(observations)?
            .into_iter()
            .filter(|row| !self.config.require_full_window || row.features.rolling.is_full())
            .filter_map(|row| {
                Some(TrainingRow {
                    features: row.features,
                    aqi: row.aqi,
                    target_aqi: row.target_aqi?,
                })
            })
            .collect();

        if rows.is_empty() {
            // Only reachable with require_full_window: the first labeled full-window
            // row needs a window, the row itself and its following day.
            return Err(FeatureError::InsufficientHistory {
                required: ROLLING_WINDOW + 2,
                actual: observations.len(),
            });
        }

        info!("Built {} training rows", rows.len());
        Ok(rows)
    }
}
