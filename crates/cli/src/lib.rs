//! AQI Forecast Command Line
//!
//! Wires the CSV observation source and the JSON model store to the feature,
//! training and inference crates.

use anyhow::Context;
use aqi_index::AqiResult;
use clap::Subcommand;
use data_validator::Validator;
use feature_engine::{FeatureEngineer, FeatureSchema};
use inference_engine::{FeatureReconstructor, InferenceEngine, ModelHandle, PersistenceTrainer};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use training::TrainingTableBuilder;

mod config;
mod source;
mod store;

pub use config::{load_config, AppConfig, ENV_PREFIX};
pub use source::CsvObservationSource;
pub use store::{save_model, JsonModelLoader};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the AQI for one pair of concentrations
    Aqi {
        /// PM2.5 concentration (µg/m³)
        #[arg(long)]
        pm25: f64,

        /// Ozone concentration, in the configured unit
        #[arg(long)]
        o3: f64,
    },

    /// Fit the persistence baseline and report validation metrics
    Train {
        /// Daily observations CSV
        #[arg(short = 'i', long)]
        observations: PathBuf,

        /// Model artifact path (defaults to the configured path)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Forecast the day after the latest observation
    Predict {
        /// Daily observations CSV; only the most recent week is used
        #[arg(short = 'i', long)]
        observations: PathBuf,

        /// Model artifact path (defaults to the configured path)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
}

/// Run a command, printing its JSON result to stdout
pub fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let output = match command {
        Command::Aqi { pm25, o3 } => serde_json::to_string_pretty(&aqi(config, pm25, o3)?)?,
        Command::Train {
            observations,
            model,
        } => {
            let model_path = model.unwrap_or_else(|| config.model_path.clone());
            let report = train(config, &observations, &model_path)?;
            serde_json::to_string_pretty(&report)?
        }
        Command::Predict {
            observations,
            model,
        } => {
            let model_path = model.unwrap_or_else(|| config.model_path.clone());
            let forecast = predict(config, &observations, &model_path)?;
            serde_json::to_string_pretty(&forecast)?
        }
    };
    println!("{}", output);
    Ok(())
}

/// AQI for one pair of concentrations, ozone in the configured unit
pub fn aqi(config: &AppConfig, pm25: f64, o3: f64) -> anyhow::Result<AqiResult> {
    let o3_ppb = config.ozone_unit.to_ppb(o3);
    Ok(AqiResult::from_concentrations(pm25, o3_ppb)?)
}

/// Train on a CSV file and save the model
pub fn train(
    config: &AppConfig,
    observations: &Path,
    model_path: &Path,
) -> anyhow::Result<training::TrainingReport> {
    let observations = CsvObservationSource::new(observations, config.ozone_unit).observations()?;

    let builder = TrainingTableBuilder::new(
        config.training.clone(),
        FeatureEngineer::new(
            config.features.clone(),
            Validator::new(config.validation.clone()),
        ),
        FeatureSchema::current(),
    );
    let (model, report) = builder
        .train(&PersistenceTrainer, &observations)
        .context("training failed")?;

    save_model(model_path, &model)?;
    Ok(report)
}

/// Forecast from a CSV file with a saved model
pub fn predict(
    config: &AppConfig,
    observations: &Path,
    model_path: &Path,
) -> anyhow::Result<inference_engine::Forecast> {
    let observations = CsvObservationSource::new(observations, config.ozone_unit).observations()?;

    let mut handle = ModelHandle::new(JsonModelLoader::new(model_path));
    handle.load()?;
    let engine = InferenceEngine::new(
        handle,
        FeatureReconstructor::new(Validator::new(config.validation.clone())),
    );

    let result = engine
        .forecast(&observations)
        .context("forecast failed")?;
    info!(
        "Forecast {} for {} in {}ms",
        result.forecast.predicted_aqi, result.forecast.date, result.latency_ms
    );
    Ok(result.forecast)
}

/// Initialize logging to stderr
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let level = Level::from_str(level)
        .map_err(|_| anyhow::anyhow!("invalid log level: {}", level))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
