//! Daily Observation Records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ozone concentration unit as delivered by a raw source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OzoneUnit {
    /// Parts per billion
    #[default]
    Ppb,
    /// Parts per million
    Ppm,
}

impl OzoneUnit {
    /// Convert a concentration in this unit to ppb
    pub fn to_ppb(&self, value: f64) -> f64 {
        match self {
            OzoneUnit::Ppb => value,
            OzoneUnit::Ppm => value * 1000.0,
        }
    }
}

/// One calendar day of pollutant and weather observations for one city.
///
/// `o3` is always in ppb; conversion happens when the record is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    /// PM2.5 (µg/m³)
    pub pm25: f64,
    /// Ozone (ppb)
    pub o3: f64,
    pub temperature: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
}

impl DailyObservation {
    /// Build an observation, converting ozone to ppb
    pub fn new(
        date: NaiveDate,
        pm25: f64,
        o3: f64,
        o3_unit: OzoneUnit,
        temperature: f64,
        wind_speed: f64,
        precipitation: f64,
    ) -> Self {
        Self {
            date,
            pm25,
            o3: o3_unit.to_ppb(o3),
            temperature,
            wind_speed,
            precipitation,
        }
    }
}

/// Observation as merged from the raw sources, with gaps left empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub pm25: Option<f64>,
    pub o3: Option<f64>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation: Option<f64>,
}

impl RawObservation {
    /// Column names a raw source must provide, even when cells are empty
    pub const COLUMNS: [&'static str; 6] = [
        "date",
        "pm25",
        "o3",
        "temperature",
        "wind_speed",
        "precipitation",
    ];
}
