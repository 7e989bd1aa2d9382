//! Forecast Engine
//!
//! Reconstructs tomorrow's features, runs the loaded model and categorizes
//! the predicted AQI for the presentation layer.

use crate::handle::ModelHandle;
use crate::reconstructor::FeatureReconstructor;
use crate::regressor::{ModelLoader, Regressor};
use crate::InferenceError;
use aqi_index::{categorize, AqiCategory, SeverityTier};
use chrono::NaiveDate;
use data_validator::DailyObservation;
use serde::Serialize;
use tracing::{debug, info};

/// Forecast payload handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// Day being forecast
    pub date: NaiveDate,
    pub predicted_aqi: u16,
    pub category: AqiCategory,
    pub advisory_text: &'static str,
    pub severity_tier: SeverityTier,
}

/// Result of a forecast operation
#[derive(Debug, Clone)]
pub struct ForecastResult {
    pub forecast: Forecast,
    /// Unrounded model output
    pub raw_prediction: f64,
    /// Inference latency in milliseconds
    pub latency_ms: u64,
}

/// Next-day AQI forecaster
pub struct InferenceEngine<L: ModelLoader> {
    handle: ModelHandle<L>,
    reconstructor: FeatureReconstructor,
}

impl<L: ModelLoader> InferenceEngine<L> {
    /// Create a new inference engine
    pub fn new(handle: ModelHandle<L>, reconstructor: FeatureReconstructor) -> Self {
        info!("Creating inference engine (model loaded: {})", handle.is_loaded());
        Self {
            handle,
            reconstructor,
        }
    }

    pub fn handle(&self) -> &ModelHandle<L> {
        &self.handle
    }

    /// Mutable access for load / reload
    pub fn handle_mut(&mut self) -> &mut ModelHandle<L> {
        &mut self.handle
    }

    /// Forecast the day after the latest observation in `tail`
    pub fn forecast(&self, tail: &[DailyObservation]) -> Result<ForecastResult, InferenceError> {
        let start = std::time::Instant::now();

        let model = self.handle.model()?;
        let table = self
            .reconstructor
            .reconstruct_table(tail, model.feature_schema())?;
        let predictions = model.predict(&table)?;

        let raw_prediction = match predictions.as_slice() {
            [value] => *value,
            other => {
                return Err(InferenceError::InvalidOutputShape {
                    expected: 1,
                    actual: other.len(),
                })
            }
        };
        if !raw_prediction.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "model returned {}",
                raw_prediction
            )));
        }

        let predicted_aqi = to_aqi(raw_prediction);
        let categorization = categorize(predicted_aqi);
        let date = table.dates()[0];

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(
            "Forecast for {}: {} ({:?}) in {}ms",
            date, predicted_aqi, categorization.category, latency_ms
        );

        Ok(ForecastResult {
            forecast: Forecast {
                date,
                predicted_aqi,
                category: categorization.category,
                advisory_text: categorization.advisory_text,
                severity_tier: categorization.severity_tier,
            },
            raw_prediction,
            latency_ms,
        })
    }
}

/// Round a model output to a non-negative integer AQI.
///
/// Halves go to the even neighbour, the same rule sub-index interpolation uses.
fn to_aqi(raw: f64) -> u16 {
    raw.round_ties_even().clamp(0.0, f64::from(u16::MAX)) as u16
}
