//! Display-ready forecast models

use serde::{Deserialize, Serialize};

/// A single hourly entry, already formatted for display
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ForecastPoint {
    /// Weekday abbreviation and 24-hour time, e.g. `Mon 15:04`
    pub date: String,
    /// Temperature rounded to one decimal with a `°C` suffix
    pub temperature: String,
}

impl ForecastPoint {
    #[must_use]
    pub fn new(date: impl Into<String>, temperature: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            temperature: temperature.into(),
        }
    }
}

/// Everything the weather page needs for one city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WeatherDisplay {
    pub city: String,
    /// Forecast points in the order the forecast service returned them
    pub forecasts: Vec<ForecastPoint>,
}
