//! Temporal Holdout Split

use crate::TrainingError;
use feature_engine::TrainingRow;
use tracing::debug;

/// Chronological train / validation split
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalSplit {
    pub train: Vec<TrainingRow>,
    pub validation: Vec<TrainingRow>,
}

/// Hold out the final `holdout` rows for validation.
///
/// Rows must be in strictly increasing date order; they are never shuffled.
pub fn temporal_holdout(
    rows: &[TrainingRow],
    holdout: usize,
) -> Result<TemporalSplit, TrainingError> {
    if let Some(i) = rows
        .windows(2)
        .position(|pair| pair[1].date() <= pair[0].date())
    {
        return Err(TrainingError::Unordered(i + 1));
    }
    if holdout == 0 || rows.len() <= holdout {
        return Err(TrainingError::InsufficientRows {
            holdout,
            actual: rows.len(),
        });
    }

    let (train, validation) = rows.split_at(rows.len() - holdout);
    debug!(
        "Temporal split: {} train rows, {} validation rows",
        train.len(),
        validation.len()
    );
    Ok(TemporalSplit {
        train: train.to_vec(),
        validation: validation.to_vec(),
    })
}
