//! Geocoding client for the Open-Meteo geocoding API
//!
//! Looks a place name up and returns the coordinate of the best match.
//! Exactly one result is requested, in English, without retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::models::Coordinate;
use crate::{CityWeatherError, Result};

/// Resolves a place name to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// # Errors
    ///
    /// Fails with [`CityWeatherError::UpstreamLookup`] on network failure,
    /// an undecodable body, or an empty result set.
    async fn lookup(&self, name: &str) -> Result<Coordinate>;
}

/// Open-Meteo backed [`Geocoder`]
#[derive(Clone)]
pub struct OpenMeteoGeocoder {
    client: Client,
    base_url: String,
}

impl OpenMeteoGeocoder {
    /// `base_url` is the API root, e.g. `https://geocoding-api.open-meteo.com/v1`
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, name: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(name)
        )
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn lookup(&self, name: &str) -> Result<Coordinate> {
        let url = self.search_url(name);
        debug!("Calling the geocoding API");

        let response = self.client.get(url).send().await.map_err(|e| {
            CityWeatherError::upstream_lookup(CityWeatherError::wrap(
                "error making request to Geo API",
                e,
            ))
        })?;

        let body: GeocodingResponse = response.json().await.map_err(|e| {
            CityWeatherError::upstream_lookup(CityWeatherError::wrap(
                "error decoding response from Geo API",
                e,
            ))
        })?;

        let first = body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| CityWeatherError::upstream_lookup("no results returned from Geo API"))?;

        debug!(
            "Found {} ({:.4}, {:.4})",
            first.name.as_deref().unwrap_or(name),
            first.latitude,
            first.longitude
        );
        Ok(first.into())
    }
}

/// Geocoding response from `OpenMeteo`; `results` is omitted when nothing matches
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GeocodingResult> for Coordinate {
    fn from(result: GeocodingResult) -> Self {
        Coordinate::new(result.latitude, result.longitude)
    }
}
