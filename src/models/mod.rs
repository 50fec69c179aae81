//! Data models for the CityWeather service
//!
//! - Location: coordinates and the persisted city record
//! - Forecast: display-ready forecast points for one city

pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use forecast::{ForecastPoint, WeatherDisplay};
pub use location::{CityRecord, Coordinate};
