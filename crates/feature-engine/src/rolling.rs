//! Rolling-Window Means
//!
//! The mean attributed to day `d` covers days `d-7 ..= d-1` and never day `d`
//! itself. Batch and inference paths both go through [`RollingMeans::over`]
//! with slices produced by [`lagged_window`] / [`latest_window`], so they sum
//! the same values in the same order.

use data_validator::DailyObservation;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Rolling window length in days
pub const ROLLING_WINDOW: usize = 7;

/// Arithmetic mean of a slice, `None` when empty
pub fn window_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Indices of the window attributed to row `index`: up to `window` days
/// strictly before it. Empty for the first row.
pub fn lagged_window(index: usize, window: usize) -> Range<usize> {
    index.saturating_sub(window)..index
}

/// Indices of the last `window` rows of a series of length `len`
pub fn latest_window(len: usize, window: usize) -> Range<usize> {
    len.saturating_sub(window)..len
}

/// Means of the four rolled covariates over one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingMeans {
    pub pm25: f64,
    pub o3: f64,
    pub temperature: f64,
    pub wind_speed: f64,
    /// Number of days the means were taken over
    pub days: usize,
}

impl RollingMeans {
    /// Compute the means over a window of observations
    pub fn over(window: &[DailyObservation]) -> Option<Self> {
        let column = |f: fn(&DailyObservation) -> f64| -> Option<f64> {
            let values: Vec<f64> = window.iter().map(f).collect();
            window_mean(&values)
        };

        Some(Self {
            pm25: column(|o| o.pm25)?,
            o3: column(|o| o.o3)?,
            temperature: column(|o| o.temperature)?,
            wind_speed: column(|o| o.wind_speed)?,
            days: window.len(),
        })
    }

    /// Whether the window covered the full rolling length
    pub fn is_full(&self) -> bool {
        self.days >= ROLLING_WINDOW
    }
}
