//! Schema-Labeled Feature Tables

use crate::InferenceError;
use chrono::NaiveDate;
use feature_engine::{FeatureSchema, FeatureVector, TrainingRow, TARGET_COLUMN};
use serde::{Deserialize, Serialize};

/// Feature rows whose columns follow a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    schema: FeatureSchema,
    dates: Vec<NaiveDate>,
    rows: Vec<Vec<f64>>,
}

impl FeatureTable {
    /// Project feature vectors onto a schema
    pub fn from_vectors(
        schema: &FeatureSchema,
        vectors: &[FeatureVector],
    ) -> Result<Self, InferenceError> {
        let rows = vectors
            .iter()
            .map(|v| schema.project(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            schema: schema.clone(),
            dates: vectors.iter().map(|v| v.date).collect(),
            rows,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column by name
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.schema.columns().iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }
}

/// Feature table with a target column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledTable {
    features: FeatureTable,
    target_column: String,
    targets: Vec<f64>,
}

impl LabeledTable {
    /// Build a labeled table from training rows
    pub fn from_rows(schema: &FeatureSchema, rows: &[TrainingRow]) -> Result<Self, InferenceError> {
        let vectors: Vec<FeatureVector> = rows.iter().map(|r| r.features).collect();
        Ok(Self {
            features: FeatureTable::from_vectors(schema, &vectors)?,
            target_column: TARGET_COLUMN.to_string(),
            targets: rows.iter().map(|r| f64::from(r.target_aqi)).collect(),
        })
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
