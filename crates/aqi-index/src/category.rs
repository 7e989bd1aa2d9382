//! AQI Categories, Advisories and Severity Tiers

use crate::breakpoints::{overall_aqi, Pollutant};
use crate::AqiError;
use serde::{Deserialize, Serialize};

/// EPA health category for an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthySensitive,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301 and above
    Hazardous,
}

impl AqiCategory {
    /// Map an AQI value onto its inclusive band
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthySensitive,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Get health advisory
    pub fn advisory(&self) -> &'static str {
        match self {
            AqiCategory::Good => {
                "Air quality is considered satisfactory, and air pollution poses little or no risk."
            }
            AqiCategory::Moderate => {
                "Air quality is acceptable; however, for some pollutants there may be a moderate \
                 health concern for a very small number of people who are unusually sensitive \
                 to air pollution."
            }
            AqiCategory::UnhealthySensitive => {
                "Members of sensitive groups may experience health effects. The general public \
                 is not likely to be affected."
            }
            AqiCategory::Unhealthy => {
                "Everyone may begin to experience health effects; members of sensitive groups \
                 may experience more serious health effects."
            }
            AqiCategory::VeryUnhealthy => {
                "Health alert: everyone may experience more serious health effects."
            }
            AqiCategory::Hazardous => {
                "Health warnings of emergency conditions. The entire population is more likely \
                 to be affected."
            }
        }
    }

    /// Coarse tier used by the presentation layer
    pub fn severity_tier(&self) -> SeverityTier {
        match self {
            AqiCategory::Good => SeverityTier::Good,
            AqiCategory::Moderate => SeverityTier::Moderate,
            _ => SeverityTier::Unhealthy,
        }
    }
}

/// Coarse severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Good,
    Moderate,
    Unhealthy,
}

impl SeverityTier {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Good => "good",
            SeverityTier::Moderate => "moderate",
            SeverityTier::Unhealthy => "unhealthy",
        }
    }
}

/// Category, advisory and tier for one AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Categorization {
    pub category: AqiCategory,
    pub advisory_text: &'static str,
    pub severity_tier: SeverityTier,
}

/// Categorize an AQI value
pub fn categorize(aqi: u16) -> Categorization {
    let category = AqiCategory::from_aqi(aqi);
    Categorization {
        category,
        advisory_text: category.advisory(),
        severity_tier: category.severity_tier(),
    }
}

/// Fully derived AQI for one set of concentrations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AqiResult {
    pub value: u16,
    pub dominant_pollutant: Pollutant,
    pub category: AqiCategory,
    pub advisory_text: &'static str,
    pub severity_tier: SeverityTier,
}

impl AqiResult {
    /// Compute the overall AQI and categorize it
    pub fn from_concentrations(pm25: f64, o3_ppb: f64) -> Result<Self, AqiError> {
        let overall = overall_aqi(pm25, o3_ppb)?;
        let categorization = categorize(overall.value);
        Ok(Self {
            value: overall.value,
            dominant_pollutant: overall.dominant_pollutant,
            category: categorization.category,
            advisory_text: categorization.advisory_text,
            severity_tier: categorization.severity_tier,
        })
    }
}
