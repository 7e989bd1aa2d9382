//! Application Configuration

use data_validator::{OzoneUnit, ValidationConfig};
use feature_engine::FeatureConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use training::TrainingConfig;

/// Environment variable prefix, e.g. `AQI_FORECAST_TRAINING__HOLDOUT_DAYS=21`
pub const ENV_PREFIX: &str = "AQI_FORECAST";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// tracing level: error, warn, info, debug, trace
    pub log_level: String,
    /// Unit of the ozone column in observation files
    pub ozone_unit: OzoneUnit,
    /// Where the trained model artifact is written and read
    pub model_path: PathBuf,
    pub validation: ValidationConfig,
    pub features: FeatureConfig,
    pub training: TrainingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ozone_unit: OzoneUnit::Ppb,
            model_path: PathBuf::from("models/aqi-persistence.json"),
            validation: ValidationConfig::default(),
            features: FeatureConfig::default(),
            training: TrainingConfig::default(),
        }
    }
}

/// Load configuration from an optional file, then environment overrides
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
