//! Missing-Value Filling
//!
//! Each covariate column is forward-filled, then backward-filled. A column with
//! no value at all is filled with zero. Missing calendar days are never
//! fabricated; they are reported as [`ValidationError::DateGap`].

use crate::error::ValidationError;
use crate::observation::{DailyObservation, OzoneUnit, RawObservation};
use crate::validator::Validator;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// What filling had to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillSummary {
    /// Number of filled cells per column
    pub filled: BTreeMap<&'static str, usize>,
    /// Columns that had no values and were set to zero
    pub zero_filled: Vec<&'static str>,
}

impl FillSummary {
    /// Total number of filled cells
    pub fn total_filled(&self) -> usize {
        self.filled.values().sum()
    }
}

/// Forward-fill then backward-fill one column in place.
///
/// Returns the number of filled cells, or `None` if the column is entirely empty.
fn fill_column(column: &mut [Option<f64>]) -> Option<usize> {
    let first = column.iter().position(Option::is_some)?;
    let missing = column.iter().filter(|v| v.is_none()).count();

    let mut last = column[first];
    for cell in column.iter_mut().skip(first + 1) {
        if cell.is_some() {
            last = *cell;
        } else {
            *cell = last;
        }
    }
    let leading = column[first];
    for cell in column.iter_mut().take(first) {
        *cell = leading;
    }

    Some(missing)
}

/// Turn raw merged rows into complete daily observations
pub fn fill_missing(
    raw: &[RawObservation],
    o3_unit: OzoneUnit,
) -> Result<(Vec<DailyObservation>, FillSummary), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }
    Validator::default().validate_dates(raw.iter().map(|r| r.date))?;

    let mut columns: [(&'static str, Vec<Option<f64>>); 5] = [
        ("pm25", raw.iter().map(|r| r.pm25).collect()),
        ("o3", raw.iter().map(|r| r.o3).collect()),
        ("temperature", raw.iter().map(|r| r.temperature).collect()),
        ("wind_speed", raw.iter().map(|r| r.wind_speed).collect()),
        ("precipitation", raw.iter().map(|r| r.precipitation).collect()),
    ];

    let mut summary = FillSummary::default();
    for (name, column) in columns.iter_mut() {
        match fill_column(column) {
            Some(0) => {}
            Some(count) => {
                summary.filled.insert(*name, count);
            }
            None => {
                warn!("Column {} has no values, filling with 0", name);
                column.iter_mut().for_each(|cell| *cell = Some(0.0));
                summary.zero_filled.push(*name);
            }
        }
    }

    let value = |col: usize, row: usize| columns[col].1[row].unwrap_or(0.0);
    let observations = raw
        .iter()
        .enumerate()
        .map(|(i, r)| {
            DailyObservation::new(
                r.date,
                value(0, i),
                value(1, i),
                o3_unit,
                value(2, i),
                value(3, i),
                value(4, i),
            )
        })
        .collect();

    debug!(
        "Filled {} missing cells across {} rows",
        summary.total_filled(),
        raw.len()
    );
    Ok((observations, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(d: u32, pm25: Option<f64>, o3: Option<f64>) -> RawObservation {
        RawObservation {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            pm25,
            o3,
            temperature: Some(5.0),
            wind_speed: Some(2.0),
            precipitation: None,
        }
    }

    #[test]
    fn test_forward_then_backward_fill() {
        let rows = vec![
            raw(1, None, Some(30.0)),
            raw(2, Some(8.0), None),
            raw(3, None, None),
            raw(4, Some(11.0), Some(42.0)),
        ];
        let (obs, summary) = fill_missing(&rows, OzoneUnit::Ppb).unwrap();

        let pm25: Vec<f64> = obs.iter().map(|o| o.pm25).collect();
        assert_eq!(pm25, vec![8.0, 8.0, 8.0, 11.0]);
        let o3: Vec<f64> = obs.iter().map(|o| o.o3).collect();
        assert_eq!(o3, vec![30.0, 30.0, 30.0, 42.0]);

        assert_eq!(summary.filled.get("pm25"), Some(&2));
        assert_eq!(summary.filled.get("o3"), Some(&2));
        assert_eq!(summary.zero_filled, vec!["precipitation"]);
        assert!(obs.iter().all(|o| o.precipitation == 0.0));
    }

    #[test]
    fn test_ozone_unit_applied() {
        let rows = vec![raw(1, Some(5.0), Some(0.04)), raw(2, Some(5.0), None)];
        let (obs, _) = fill_missing(&rows, OzoneUnit::Ppm).unwrap();
        assert!((obs[0].o3 - 40.0).abs() < 1e-9);
        assert!((obs[1].o3 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_day_is_not_fabricated() {
        let rows = vec![raw(1, Some(5.0), Some(1.0)), raw(3, Some(5.0), Some(1.0))];
        assert!(matches!(
            fill_missing(&rows, OzoneUnit::Ppb),
            Err(ValidationError::DateGap { missing_days: 1, .. })
        ));
    }
}
