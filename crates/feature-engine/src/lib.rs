//! Feature Engineering Engine
//!
//! Turns daily observations into the feature rows the next-day AQI regressor
//! is trained and served on. Training and inference share the same schema,
//! window and calendar code so the two paths cannot drift apart.

mod engineer;
mod error;
mod features;
mod rolling;
mod schema;

pub use engineer::{EngineeredRow, FeatureConfig, FeatureEngineer, MIN_TRAINING_DAYS};
pub use error::FeatureError;
pub use features::{CalendarFeatures, FeatureVector, TrainingRow};
pub use rolling::{lagged_window, latest_window, window_mean, RollingMeans, ROLLING_WINDOW};
pub use schema::{Feature, FeatureSchema, TARGET_COLUMN};
