//! Air Quality Index Calculation
//!
//! Converts PM2.5 and ozone concentrations into EPA AQI values, dominant
//! pollutants and health categories. Pure functions, no state.

mod breakpoints;
mod category;
mod error;

pub use breakpoints::{
    overall_aqi, subindex, Breakpoint, BreakpointTable, OverallAqi, Pollutant,
    OZONE_8H_TABLE, PM25_TABLE,
};
pub use category::{categorize, AqiCategory, AqiResult, Categorization, SeverityTier};
pub use error::AqiError;
