//! CSV Observation Source
//!
//! Reads merged daily rows with columns
//! `date,pm25,o3,temperature,wind_speed,precipitation`. Empty cells are filled
//! per column; missing columns and missing dates are errors.

use anyhow::Context;
use data_validator::{fill_missing, DailyObservation, OzoneUnit, RawObservation, Validator};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Daily observations stored in a CSV file
#[derive(Debug, Clone)]
pub struct CsvObservationSource {
    path: PathBuf,
    o3_unit: OzoneUnit,
}

impl CsvObservationSource {
    pub fn new(path: impl AsRef<Path>, o3_unit: OzoneUnit) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            o3_unit,
        }
    }

    /// Rows as stored, gaps left empty
    pub fn read_raw(&self) -> anyhow::Result<Vec<RawObservation>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("reading header of {}", self.path.display()))?;
        Validator::default()
            .validate_columns(headers.iter())
            .with_context(|| format!("checking columns of {}", self.path.display()))?;

        let mut rows = Vec::new();
        for (i, record) in reader.deserialize::<RawObservation>().enumerate() {
            let row = record.with_context(|| format!("{}: row {}", self.path.display(), i + 1))?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Complete observations, ordered and gap-free
    pub fn observations(&self) -> anyhow::Result<Vec<DailyObservation>> {
        let raw = self.read_raw()?;
        let (observations, summary) = fill_missing(&raw, self.o3_unit)
            .with_context(|| format!("preparing observations from {}", self.path.display()))?;

        if summary.total_filled() > 0 {
            warn!("Filled {} missing cells: {:?}", summary.total_filled(), summary.filled);
        }
        info!(
            "Loaded {} observations from {}",
            observations.len(),
            self.path.display()
        );
        Ok(observations)
    }
}
