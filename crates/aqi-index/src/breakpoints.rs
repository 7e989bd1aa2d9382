//! Breakpoint Tables and Sub-Index Interpolation
//!
//! Concentrations are truncated (never rounded) to the table's precision before
//! lookup: one decimal for PM2.5, whole ppb for 8-hour ozone.

use crate::AqiError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pollutants the index is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    /// Fine particulate matter, 24-hour average (µg/m³)
    #[serde(rename = "PM2.5")]
    Pm25,
    /// Ozone, 8-hour average (ppb)
    #[serde(rename = "Ozone")]
    Ozone,
}

impl Pollutant {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Ozone => "Ozone",
        }
    }

    /// Breakpoint table for this pollutant
    pub fn table(&self) -> &'static BreakpointTable {
        match self {
            Pollutant::Pm25 => &PM25_TABLE,
            Pollutant::Ozone => &OZONE_8H_TABLE,
        }
    }
}

/// A closed concentration interval mapped onto a closed AQI interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub conc_low: f64,
    pub conc_high: f64,
    pub aqi_low: u16,
    pub aqi_high: u16,
}

impl Breakpoint {
    const fn new(conc_low: f64, conc_high: f64, aqi_low: u16, aqi_high: u16) -> Self {
        Self {
            conc_low,
            conc_high,
            aqi_low,
            aqi_high,
        }
    }

    /// Whether a truncated concentration falls inside this bracket
    pub fn contains(&self, concentration: f64) -> bool {
        concentration >= self.conc_low && concentration <= self.conc_high
    }

    /// Linear interpolation, rounded to the nearest integer (ties to even)
    pub fn interpolate(&self, concentration: f64) -> u16 {
        let span = self.conc_high - self.conc_low;
        let aqi_span = f64::from(self.aqi_high - self.aqi_low);
        let aqi = (concentration - self.conc_low) / span * aqi_span + f64::from(self.aqi_low);
        aqi.round_ties_even() as u16
    }
}

/// Ordered breakpoint table for one pollutant
#[derive(Debug)]
pub struct BreakpointTable {
    /// Pollutant the table applies to
    pub pollutant: Pollutant,
    /// Brackets in ascending concentration order
    pub brackets: &'static [Breakpoint],
    /// Fixed index reported above the last bracket
    pub ceiling: u16,
    /// Decimal places kept when truncating concentrations
    pub decimals: i32,
}

// Guards against representation error, e.g. 2.3 * 10.0 == 22.999999999999996.
const TRUNCATION_EPSILON: f64 = 1e-9;

impl BreakpointTable {
    /// Truncate a concentration to the table's precision
    pub fn truncate(&self, concentration: f64) -> f64 {
        let scale = 10f64.powi(self.decimals);
        (concentration * scale + TRUNCATION_EPSILON).floor() / scale
    }

    /// Bracket containing an already-truncated concentration
    pub fn bracket(&self, truncated: f64) -> Option<&'static Breakpoint> {
        self.brackets.iter().find(|b| b.contains(truncated))
    }

    /// Upper bound of the highest bracket
    pub fn max_concentration(&self) -> f64 {
        self.brackets.last().map_or(0.0, |b| b.conc_high)
    }

    /// Compute the sub-index for a concentration
    pub fn subindex(&self, concentration: f64) -> Result<u16, AqiError> {
        if !concentration.is_finite() || concentration < 0.0 {
            return Err(AqiError::InvalidInput {
                pollutant: self.pollutant.as_str(),
                value: concentration,
            });
        }

        let truncated = self.truncate(concentration);
        match self.bracket(truncated) {
            Some(bracket) => Ok(bracket.interpolate(truncated)),
            None if truncated > self.max_concentration() => Ok(self.ceiling),
            None => Err(AqiError::InvalidInput {
                pollutant: self.pollutant.as_str(),
                value: concentration,
            }),
        }
    }
}

/// PM2.5 24-hour breakpoints (µg/m³)
pub static PM25_TABLE: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::Pm25,
    brackets: &[
        Breakpoint::new(0.0, 12.0, 0, 50),
        Breakpoint::new(12.1, 35.4, 51, 100),
        Breakpoint::new(35.5, 55.4, 101, 150),
        Breakpoint::new(55.5, 150.4, 151, 200),
        Breakpoint::new(150.5, 250.4, 201, 300),
        Breakpoint::new(250.5, 350.4, 301, 400),
        Breakpoint::new(350.5, 500.4, 401, 500),
    ],
    ceiling: 501,
    decimals: 1,
};

/// Ozone 8-hour breakpoints (ppb). 1-hour breakpoints are not used.
pub static OZONE_8H_TABLE: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::Ozone,
    brackets: &[
        Breakpoint::new(0.0, 54.0, 0, 50),
        Breakpoint::new(55.0, 70.0, 51, 100),
        Breakpoint::new(71.0, 85.0, 101, 150),
        Breakpoint::new(86.0, 105.0, 151, 200),
        Breakpoint::new(106.0, 200.0, 201, 300),
    ],
    ceiling: 301,
    decimals: 0,
};

/// Compute the AQI sub-index of a single pollutant
pub fn subindex(pollutant: Pollutant, concentration: f64) -> Result<u16, AqiError> {
    pollutant.table().subindex(concentration)
}

/// Overall AQI with the pollutant that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallAqi {
    /// Larger of the two sub-indices
    pub value: u16,
    /// Pollutant whose sub-index is reported
    pub dominant_pollutant: Pollutant,
    pub pm25_subindex: u16,
    pub ozone_subindex: u16,
}

/// Compute the overall AQI from PM2.5 (µg/m³) and ozone (ppb).
///
/// The larger sub-index wins; on an exact tie PM2.5 is reported as dominant.
pub fn overall_aqi(pm25: f64, o3_ppb: f64) -> Result<OverallAqi, AqiError> {
    let pm25_subindex = PM25_TABLE.subindex(pm25)?;
    let ozone_subindex = OZONE_8H_TABLE.subindex(o3_ppb)?;

    let (value, dominant_pollutant) = if pm25_subindex >= ozone_subindex {
        (pm25_subindex, Pollutant::Pm25)
    } else {
        (ozone_subindex, Pollutant::Ozone)
    };

    debug!(
        "AQI: pm25={} -> {}, o3={} -> {}, overall={} ({})",
        pm25,
        pm25_subindex,
        o3_ppb,
        ozone_subindex,
        value,
        dominant_pollutant.as_str()
    );

    Ok(OverallAqi {
        value,
        dominant_pollutant,
        pm25_subindex,
        ozone_subindex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pm25_bracket_boundaries() {
        assert_eq!(subindex(Pollutant::Pm25, 0.0).unwrap(), 0);
        assert_eq!(subindex(Pollutant::Pm25, 12.0).unwrap(), 50);
        assert_eq!(subindex(Pollutant::Pm25, 12.1).unwrap(), 51);
        assert_eq!(subindex(Pollutant::Pm25, 35.4).unwrap(), 100);
        assert_eq!(subindex(Pollutant::Pm25, 35.5).unwrap(), 101);
        assert_eq!(subindex(Pollutant::Pm25, 500.4).unwrap(), 500);
    }

    #[test]
    fn test_pm25_truncates_instead_of_rounding() {
        // 12.09 truncates to 12.0, not 12.1
        assert_eq!(subindex(Pollutant::Pm25, 12.09).unwrap(), 50);
        // 35.49 truncates to 35.4
        assert_eq!(subindex(Pollutant::Pm25, 35.49).unwrap(), 100);
        // 2.3 must not be truncated to 2.2 by float error
        assert_eq!(PM25_TABLE.truncate(2.3), 2.3);
    }

    #[test]
    fn test_pm25_above_table_is_fixed() {
        assert_eq!(subindex(Pollutant::Pm25, 500.5).unwrap(), 501);
        assert_eq!(subindex(Pollutant::Pm25, 600.0).unwrap(), 501);
        assert_eq!(subindex(Pollutant::Pm25, 10_000.0).unwrap(), 501);
    }

    #[test]
    fn test_ozone_brackets() {
        assert_eq!(subindex(Pollutant::Ozone, 54.0).unwrap(), 50);
        assert_eq!(subindex(Pollutant::Ozone, 54.9).unwrap(), 50);
        assert_eq!(subindex(Pollutant::Ozone, 55.0).unwrap(), 51);
        assert_eq!(subindex(Pollutant::Ozone, 65.0).unwrap(), 84);
        assert_eq!(subindex(Pollutant::Ozone, 200.0).unwrap(), 300);
        assert_eq!(subindex(Pollutant::Ozone, 201.0).unwrap(), 301);
    }

    #[test]
    fn test_invalid_concentrations() {
        assert!(subindex(Pollutant::Pm25, -0.1).is_err());
        assert!(subindex(Pollutant::Ozone, -1.0).is_err());
        assert!(subindex(Pollutant::Pm25, f64::NAN).is_err());
        assert!(subindex(Pollutant::Ozone, f64::INFINITY).is_err());
    }

    #[test]
    fn test_overall_pm25_dominates() {
        let aqi = overall_aqi(40.5, 65.0).unwrap();
        assert_eq!(aqi.pm25_subindex, 113);
        assert_eq!(aqi.ozone_subindex, 84);
        assert_eq!(aqi.value, 113);
        assert_eq!(aqi.dominant_pollutant, Pollutant::Pm25);
    }

    #[test]
    fn test_overall_ozone_dominates() {
        let aqi = overall_aqi(5.0, 90.0).unwrap();
        assert_eq!(aqi.dominant_pollutant, Pollutant::Ozone);
        assert_eq!(aqi.value, aqi.ozone_subindex);
    }

    #[test]
    fn test_tie_favors_pm25() {
        // Both sub-indices are exactly 50
        let aqi = overall_aqi(12.0, 54.0).unwrap();
        assert_eq!(aqi.pm25_subindex, aqi.ozone_subindex);
        assert_eq!(aqi.dominant_pollutant, Pollutant::Pm25);

        let aqi = overall_aqi(0.0, 0.0).unwrap();
        assert_eq!(aqi.value, 0);
        assert_eq!(aqi.dominant_pollutant, Pollutant::Pm25);
    }

    #[test]
    fn test_overall_propagates_invalid_input() {
        assert_eq!(
            overall_aqi(-1.0, 30.0),
            Err(AqiError::InvalidInput {
                pollutant: "PM2.5",
                value: -1.0
            })
        );
    }
}
