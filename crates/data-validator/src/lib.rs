//! Observation Validation and Filling
//!
//! Defines the daily observation record the forecasting pipeline consumes,
//! checks values and date ordering, and fills missing covariates.

mod error;
mod filler;
mod observation;
mod validator;

pub use error::ValidationError;
pub use filler::{fill_missing, FillSummary};
pub use observation::{DailyObservation, OzoneUnit, RawObservation};
pub use validator::{ValidationConfig, Validator};
