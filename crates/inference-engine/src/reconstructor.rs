//! Inference Feature Reconstruction
//!
//! Builds the feature row for the day after the latest observation from a
//! short tail of history. The rolling window is the last seven real days, the
//! same window the batch engineer attributes to that day. Same-day covariates
//! are carried forward from the latest observation, since tomorrow's readings
//! are not observed yet.

use crate::table::FeatureTable;
use crate::InferenceError;
use data_validator::{DailyObservation, Validator};
use feature_engine::{latest_window, FeatureSchema, FeatureVector, RollingMeans, ROLLING_WINDOW};
use tracing::debug;

/// Reconstructs tomorrow's feature vector from recent observations
#[derive(Debug, Clone, Default)]
pub struct FeatureReconstructor {
    validator: Validator,
}

impl FeatureReconstructor {
    /// Create a new reconstructor
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// Feature vector for `latest_date + 1`.
    ///
    /// `tail` holds at least seven contiguous observations, latest last.
    pub fn reconstruct(&self, tail: &[DailyObservation]) -> Result<FeatureVector, InferenceError> {
        if tail.len() < ROLLING_WINDOW {
            return Err(InferenceError::InsufficientHistory {
                required: ROLLING_WINDOW,
                actual: tail.len(),
            });
        }
        self.validator.validate_sequence(tail)?;

        let latest = &tail[tail.len() - 1];
        let date = latest.date.succ_opt().ok_or_else(|| {
            InferenceError::InvalidInput(format!("no calendar day after {}", latest.date))
        })?;
        let rolling = RollingMeans::over(&tail[latest_window(tail.len(), ROLLING_WINDOW)])
            .ok_or_else(|| InferenceError::InvalidInput("empty rolling window".into()))?;

        debug!(
            "Reconstructed features for {} from {} observations",
            date,
            tail.len()
        );
        Ok(FeatureVector::assemble(date, latest, rolling))
    }

    /// Single-row table for tomorrow, ordered by `schema`
    pub fn reconstruct_table(
        &self,
        tail: &[DailyObservation],
        schema: &FeatureSchema,
    ) -> Result<FeatureTable, InferenceError> {
        let vector = self.reconstruct(tail)?;
        FeatureTable::from_vectors(schema, &[vector])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use feature_engine::FeatureError;

    fn tail(n: usize) -> Vec<DailyObservation> {
        let start = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        (0..n)
            .map(|i| DailyObservation {
                date: start + Days::new(i as u64),
                pm25: 10.0 + i as f64,
                o3: 35.0,
                temperature: 1.0 + i as f64,
                wind_speed: 5.0,
                precipitation: 0.5,
            })
            .collect()
    }

    #[test]
    fn test_insufficient_history() {
        let r = FeatureReconstructor::default();
        assert_eq!(
            r.reconstruct(&tail(6)),
            Err(InferenceError::InsufficientHistory {
                required: 7,
                actual: 6
            })
        );
    }

    #[test]
    fn test_tomorrow_features() {
        let r = FeatureReconstructor::default();
        let obs = tail(9);
        let v = r.reconstruct(&obs).unwrap();

        // 2024-02-28 + 1 day, leap year
        assert_eq!(v.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(v.calendar.month, 2);
        assert_eq!(v.calendar.day, 29);
        // Raw covariates carried forward from the latest day
        assert_eq!(v.pm25, 18.0);
        assert_eq!(v.temperature, 9.0);
        // Window is the last seven days: pm25 12..=18
        assert_eq!(v.rolling.pm25, 15.0);
        assert_eq!(v.rolling.days, 7);
    }

    #[test]
    fn test_missing_column_is_invalid_input() {
        let r = FeatureReconstructor::default();
        let schema = FeatureSchema::new(2, vec!["pm25".into(), "humidity".into()]).unwrap();
        let err = r.reconstruct_table(&tail(7), &schema).unwrap_err();
        assert_eq!(
            err,
            InferenceError::Feature(FeatureError::MissingColumn("humidity".into()))
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_table_follows_schema_order() {
        let r = FeatureReconstructor::default();
        let schema = FeatureSchema::new(2, vec!["weekday".into(), "pm25_7d_mean".into()]).unwrap();
        let table = r.reconstruct_table(&tail(7), &schema).unwrap();
        assert_eq!(table.len(), 1);
        // 2024-02-27 is a Tuesday (1); pm25 10..=16 averages 13
        assert_eq!(table.rows()[0], vec![1.0, 13.0]);
    }

    #[test]
    fn test_unordered_tail_rejected() {
        let r = FeatureReconstructor::default();
        let mut obs = tail(8);
        obs.swap(2, 3);
        assert!(r.reconstruct(&obs).unwrap_err().is_invalid_input());
    }
}
