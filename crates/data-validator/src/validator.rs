//! Observation Validator for Range and Date Checking

use crate::error::ValidationError;
use crate::observation::{DailyObservation, RawObservation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration.
///
/// Defaults only require pollutants to be non-negative and weather to be
/// finite; concentrations above the breakpoint tables are valid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// PM2.5 valid range (µg/m³)
    pub pm25_range: (f64, f64),
    /// Ozone valid range (ppb)
    pub o3_ppb_range: (f64, f64),
    /// Temperature valid range
    pub temperature_range: (f64, f64),
    /// Wind speed valid range
    pub wind_speed_range: (f64, f64),
    /// Precipitation valid range
    pub precipitation_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            pm25_range: (0.0, f64::INFINITY),
            o3_ppb_range: (0.0, f64::INFINITY),
            temperature_range: (f64::MIN, f64::MAX),
            wind_speed_range: (f64::MIN, f64::MAX),
            precipitation_range: (f64::MIN, f64::MAX),
        }
    }
}

/// Validator for daily observations and observation sequences
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        date: NaiveDate,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field, date });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                date,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate every field of one observation
    pub fn validate_observation(&self, obs: &DailyObservation) -> Result<(), ValidationError> {
        let c = &self.config;
        self.validate_range("pm25", obs.date, obs.pm25, c.pm25_range)?;
        self.validate_range("o3", obs.date, obs.o3, c.o3_ppb_range)?;
        self.validate_range("temperature", obs.date, obs.temperature, c.temperature_range)?;
        self.validate_range("wind_speed", obs.date, obs.wind_speed, c.wind_speed_range)?;
        self.validate_range(
            "precipitation",
            obs.date,
            obs.precipitation,
            c.precipitation_range,
        )
    }

    /// Validate that a raw source header carries every observation column
    pub fn validate_columns<'a, I>(&self, headers: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        match RawObservation::COLUMNS
            .iter()
            .copied()
            .find(|column| !headers.contains(column))
        {
            Some(column) => Err(ValidationError::MissingField(column)),
            None => Ok(()),
        }
    }

    /// Validate that dates increase by exactly one day
    pub fn validate_dates<I>(&self, dates: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut previous: Option<NaiveDate> = None;
        for next in dates {
            if let Some(prev) = previous {
                let days = next.signed_duration_since(prev).num_days();
                if days <= 0 {
                    return Err(ValidationError::DateOrder {
                        previous: prev,
                        next,
                    });
                }
                if days > 1 {
                    return Err(ValidationError::DateGap {
                        after: prev,
                        missing_days: days - 1,
                    });
                }
            }
            previous = Some(next);
        }
        Ok(())
    }

    /// Validate a gap-free, strictly increasing observation sequence
    pub fn validate_sequence(
        &self,
        observations: &[DailyObservation],
    ) -> Result<(), ValidationError> {
        if observations.is_empty() {
            return Err(ValidationError::Empty);
        }

        self.validate_dates(observations.iter().map(|o| o.date))?;
        for obs in observations {
            self.validate_observation(obs)?;
        }

        debug!(
            "Validated {} observations ({} .. {})",
            observations.len(),
            observations[0].date,
            observations[observations.len() - 1].date
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn obs(d: u32) -> DailyObservation {
        DailyObservation {
            date: day(d),
            pm25: 10.0,
            o3: 40.0,
            temperature: 15.0,
            wind_speed: 4.0,
            precipitation: 0.0,
        }
    }

    #[test]
    fn test_valid_sequence() {
        let validator = Validator::default();
        let seq: Vec<_> = (1..=10).map(obs).collect();
        assert!(validator.validate_sequence(&seq).is_ok());
    }

    #[test]
    fn test_negative_pm25_rejected() {
        let validator = Validator::default();
        let mut o = obs(1);
        o.pm25 = -3.0;
        assert!(matches!(
            validator.validate_observation(&o),
            Err(ValidationError::OutOfRange { field: "pm25", .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let validator = Validator::default();
        let mut o = obs(1);
        o.wind_speed = f64::NAN;
        assert_eq!(
            validator.validate_observation(&o),
            Err(ValidationError::NonFinite {
                field: "wind_speed",
                date: day(1)
            })
        );
    }

    #[test]
    fn test_date_gap_detected() {
        let validator = Validator::default();
        let seq = vec![obs(1), obs(2), obs(5)];
        assert_eq!(
            validator.validate_sequence(&seq),
            Err(ValidationError::DateGap {
                after: day(2),
                missing_days: 2
            })
        );
    }

    #[test]
    fn test_duplicate_and_reversed_dates() {
        let validator = Validator::default();
        assert!(matches!(
            validator.validate_sequence(&[obs(1), obs(1)]),
            Err(ValidationError::DateOrder { .. })
        ));
        assert!(matches!(
            validator.validate_sequence(&[obs(2), obs(1)]),
            Err(ValidationError::DateOrder { .. })
        ));
    }

    #[test]
    fn test_extreme_but_finite_values_accepted() {
        let validator = Validator::default();
        let mut o = obs(1);
        o.pm25 = 2500.0;
        o.o3 = 1200.0;
        o.precipitation = 150.0;
        o.temperature = -60.0;
        assert!(validator.validate_observation(&o).is_ok());
    }

    #[test]
    fn test_configured_range_still_applies() {
        let validator = Validator::new(ValidationConfig {
            precipitation_range: (0.0, 100.0),
            ..ValidationConfig::default()
        });
        let mut o = obs(1);
        o.precipitation = 150.0;
        assert!(matches!(
            validator.validate_observation(&o),
            Err(ValidationError::OutOfRange {
                field: "precipitation",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_column_reported() {
        let validator = Validator::default();
        let full = RawObservation::COLUMNS;
        assert!(validator.validate_columns(full.iter().copied()).is_ok());
        let without_o3 = ["date", "pm25", "temperature", "wind_speed", "precipitation"];
        assert_eq!(
            validator.validate_columns(without_o3),
            Err(ValidationError::MissingField("o3"))
        );
    }

    #[test]
    fn test_empty_sequence() {
        let validator = Validator::default();
        assert_eq!(validator.validate_sequence(&[]), Err(ValidationError::Empty));
    }
}
