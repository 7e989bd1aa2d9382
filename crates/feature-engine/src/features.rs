//! Feature Vector Assembly

use crate::rolling::RollingMeans;
use crate::schema::Feature;
use chrono::{Datelike, NaiveDate};
use data_validator::DailyObservation;
use serde::{Deserialize, Serialize};

/// Fields derived from the row's own date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFeatures {
    pub month: u32,
    /// Day of month
    pub day: u32,
    pub day_of_year: u32,
    /// Monday = 0
    pub weekday: u32,
}

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
            day_of_year: date.ordinal(),
            weekday: date.weekday().num_days_from_monday(),
        }
    }
}

/// Feature vector for one forecast target day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Day the row describes
    pub date: NaiveDate,
    pub pm25: f64,
    pub o3: f64,
    pub temperature: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub calendar: CalendarFeatures,
    /// Means over the days strictly before `date`
    pub rolling: RollingMeans,
}

impl FeatureVector {
    /// Assemble a row dated `date` from raw covariates and a lagged window
    pub fn assemble(date: NaiveDate, raw: &DailyObservation, rolling: RollingMeans) -> Self {
        Self {
            date,
            pm25: raw.pm25,
            o3: raw.o3,
            temperature: raw.temperature,
            wind_speed: raw.wind_speed,
            precipitation: raw.precipitation,
            calendar: CalendarFeatures::from_date(date),
            rolling,
        }
    }

    /// Value of a single feature
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Pm25 => self.pm25,
            Feature::O3 => self.o3,
            Feature::Temperature => self.temperature,
            Feature::WindSpeed => self.wind_speed,
            Feature::Precipitation => self.precipitation,
            Feature::Month => f64::from(self.calendar.month),
            Feature::Day => f64::from(self.calendar.day),
            Feature::DayOfYear => f64::from(self.calendar.day_of_year),
            Feature::Weekday => f64::from(self.calendar.weekday),
            Feature::Pm25Mean7d => self.rolling.pm25,
            Feature::O3Mean7d => self.rolling.o3,
            Feature::TemperatureMean7d => self.rolling.temperature,
            Feature::WindSpeedMean7d => self.rolling.wind_speed,
        }
    }
}

/// Feature row labeled with the following day's AQI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub features: FeatureVector,
    /// Same-day AQI
    pub aqi: u16,
    /// AQI of the following day
    pub target_aqi: u16,
}

impl TrainingRow {
    pub fn date(&self) -> NaiveDate {
        self.features.date
    }
}
