//! Versioned Feature Schema
//!
//! The ordered list of column names a regressor is fit on. Inference rows are
//! projected through the same schema, so a column the model expects but the
//! pipeline cannot produce is an error rather than a silent fill.

use crate::features::FeatureVector;
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the label column in training tables
pub const TARGET_COLUMN: &str = "target_aqi";

/// Every feature the pipeline knows how to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Pm25,
    O3,
    Temperature,
    WindSpeed,
    Precipitation,
    Month,
    /// Day of month
    Day,
    DayOfYear,
    /// Monday = 0
    Weekday,
    Pm25Mean7d,
    O3Mean7d,
    TemperatureMean7d,
    WindSpeedMean7d,
}

impl Feature {
    pub const ALL: [Feature; 13] = [
        Feature::Pm25,
        Feature::O3,
        Feature::Temperature,
        Feature::WindSpeed,
        Feature::Precipitation,
        Feature::Month,
        Feature::Day,
        Feature::DayOfYear,
        Feature::Weekday,
        Feature::Pm25Mean7d,
        Feature::O3Mean7d,
        Feature::TemperatureMean7d,
        Feature::WindSpeedMean7d,
    ];

    /// Column name
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Pm25 => "pm25",
            Feature::O3 => "o3",
            Feature::Temperature => "temperature",
            Feature::WindSpeed => "wind_speed",
            Feature::Precipitation => "precipitation",
            Feature::Month => "month",
            Feature::Day => "day",
            Feature::DayOfYear => "day_of_year",
            Feature::Weekday => "weekday",
            Feature::Pm25Mean7d => "pm25_7d_mean",
            Feature::O3Mean7d => "o3_7d_mean",
            Feature::TemperatureMean7d => "temperature_7d_mean",
            Feature::WindSpeedMean7d => "wind_speed_7d_mean",
        }
    }

    /// Look up a feature by column name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Ordered, versioned set of feature columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    version: u32,
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Raw covariates plus month / day / weekday
    pub const CALENDAR_ONLY_VERSION: u32 = 1;
    /// Raw covariates, calendar fields and lagged 7-day means
    pub const ROLLING_VERSION: u32 = 2;

    /// Create a schema from column names
    pub fn new(version: u32, columns: Vec<String>) -> Result<Self, FeatureError> {
        if columns.is_empty() {
            return Err(FeatureError::InvalidInput("feature schema has no columns".into()));
        }
        if columns.iter().any(|c| c == TARGET_COLUMN) {
            return Err(FeatureError::InvalidInput(format!(
                "target column {} cannot be a feature",
                TARGET_COLUMN
            )));
        }
        let duplicate = {
            let mut seen = HashSet::new();
            columns.iter().find(|c| !seen.insert(c.as_str())).cloned()
        };
        if let Some(dup) = duplicate {
            return Err(FeatureError::InvalidInput(format!("duplicate feature column {}", dup)));
        }
        Ok(Self { version, columns })
    }

    fn from_features(version: u32, features: &[Feature]) -> Self {
        Self {
            version,
            columns: features.iter().map(|f| f.name().to_string()).collect(),
        }
    }

    /// Schema used by the current pipeline
    pub fn current() -> Self {
        Self::from_features(
            Self::ROLLING_VERSION,
            &[
                Feature::Pm25,
                Feature::O3,
                Feature::Temperature,
                Feature::WindSpeed,
                Feature::Precipitation,
                Feature::Month,
                Feature::DayOfYear,
                Feature::Weekday,
                Feature::Pm25Mean7d,
                Feature::O3Mean7d,
                Feature::TemperatureMean7d,
                Feature::WindSpeedMean7d,
            ],
        )
    }

    /// Earlier feature set without rolling means
    pub fn calendar_only() -> Self {
        Self::from_features(
            Self::CALENDAR_ONLY_VERSION,
            &[
                Feature::Temperature,
                Feature::WindSpeed,
                Feature::Precipitation,
                Feature::Month,
                Feature::Day,
                Feature::Weekday,
                Feature::Pm25,
                Feature::O3,
            ],
        )
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolve every column to a computable feature
    pub fn resolve(&self) -> Result<Vec<Feature>, FeatureError> {
        self.columns
            .iter()
            .map(|c| Feature::from_name(c).ok_or_else(|| FeatureError::MissingColumn(c.clone())))
            .collect()
    }

    /// Project a feature vector onto this schema's column order
    pub fn project(&self, vector: &FeatureVector) -> Result<Vec<f64>, FeatureError> {
        Ok(self
            .resolve()?
            .into_iter()
            .map(|f| vector.value(f))
            .collect())
    }

    /// Require the exact same columns in the exact same order
    pub fn ensure_matches(&self, other: &FeatureSchema) -> Result<(), FeatureError> {
        if self.columns == other.columns {
            Ok(())
        } else {
            Err(FeatureError::SchemaMismatch {
                expected: self.columns.clone(),
                actual: other.columns.clone(),
            })
        }
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::current()
    }
}
