//! `CityWeather` - hourly temperature forecasts by city name
//!
//! Looks a city up through a geocoding service (caching the coordinates in a
//! relational store), fetches the hourly 2 m temperature forecast and renders
//! it as HTML. A basic-auth protected page lists recently queried cities.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocoding;
pub mod history;
pub mod location_resolver;
pub mod models;
pub mod state;
pub mod store;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::{CityWeatherError, ErrorKind};
pub use geocoding::{Geocoder, OpenMeteoGeocoder};
pub use history::HistoryReader;
pub use location_resolver::CoordinateResolver;
pub use models::{CityRecord, Coordinate, ForecastPoint, WeatherDisplay};
pub use state::AppState;
pub use store::{CityStore, MemoryCityStore, PgCityStore};
pub use weather::{ForecastSource, OpenMeteoForecast};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CityWeatherError>;
