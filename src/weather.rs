//! Forecast client for the Open-Meteo forecast API
//!
//! Only the hourly 2 m temperature is requested. The body is returned
//! untouched so parsing stays with [`crate::forecast`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::models::Coordinate;
use crate::{CityWeatherError, Result};

/// Fetches the raw hourly forecast payload for a coordinate.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// # Errors
    ///
    /// Fails with [`CityWeatherError::UpstreamFetch`] on network failure or
    /// when the body cannot be read.
    async fn fetch(&self, coordinate: Coordinate) -> Result<Vec<u8>>;
}

/// Open-Meteo backed [`ForecastSource`]
#[derive(Clone)]
pub struct OpenMeteoForecast {
    client: Client,
    base_url: String,
}

impl OpenMeteoForecast {
    /// `base_url` is the API root, e.g. `https://api.open-meteo.com/v1`
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn forecast_url(&self, coordinate: Coordinate) -> String {
        let (latitude, longitude) = coordinate.format_query();
        format!(
            "{}/forecast?latitude={latitude}&longitude={longitude}&hourly=temperature_2m",
            self.base_url.trim_end_matches('/'),
        )
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoForecast {
    #[instrument(skip(self))]
    async fn fetch(&self, coordinate: Coordinate) -> Result<Vec<u8>> {
        let url = self.forecast_url(coordinate);
        debug!("Calling the forecast API");

        let response = self.client.get(url).send().await.map_err(|e| {
            CityWeatherError::upstream_fetch(CityWeatherError::wrap(
                "error making request to Weather API",
                e,
            ))
        })?;

        let body = response.bytes().await.map_err(|e| {
            CityWeatherError::upstream_fetch(CityWeatherError::wrap(
                "error reading response from Weather API",
                e,
            ))
        })?;

        debug!("Received {} bytes from the forecast API", body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_forecast_url_uses_six_decimals() {
        let source = OpenMeteoForecast::new(Client::new(), "https://api.example/v1");
        assert_eq!(
            source.forecast_url(Coordinate::new(48.8566, 2.3522)),
            "https://api.example/v1/forecast?latitude=48.856600&longitude=2.352200&hourly=temperature_2m"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_raw_body() {
        let mock_server = MockServer::start().await;
        let payload = r#"{"hourly":{"time":["2024-01-01T00:00"],"temperature_2m":[5.2]}}"#;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "48.856600"))
            .and(query_param("longitude", "2.352200"))
            .and(query_param("hourly", "temperature_2m"))
            .respond_with(ResponseTemplate::new(200).set_body_string(payload))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = OpenMeteoForecast::new(Client::new(), mock_server.uri());
        let body = source.fetch(Coordinate::new(48.8566, 2.3522)).await.unwrap();

        assert_eq!(body, payload.as_bytes());
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        let source = OpenMeteoForecast::new(Client::new(), "http://127.0.0.1:9");
        let err = source.fetch(Coordinate::new(0.0, 0.0)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamFetch);
        assert!(
            err.to_string()
                .starts_with("error making request to Weather API: ")
        );
    }
}
