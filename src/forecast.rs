//! Forecast formatting
//!
//! Turns the raw Open-Meteo hourly payload into display-ready
//! [`ForecastPoint`]s: `"Mon 15:04"` style date labels and `"5.2°C"` style
//! temperature labels, in the order the service returned them.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::models::{ForecastPoint, WeatherDisplay};
use crate::{CityWeatherError, Result};

/// Timestamp layout used by the forecast service (local time, minute precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Weekday abbreviation and 24-hour clock
const LABEL_FORMAT: &str = "%a %H:%M";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyData,
}

#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    temperature: Vec<f64>,
}

/// Build the display model for `city` from a raw forecast payload.
///
/// Timestamps and temperatures are paired by index. Empty arrays give an
/// empty forecast.
///
/// # Errors
///
/// Returns [`CityWeatherError::MalformedPayload`] when the payload is not the
/// expected JSON, a timestamp does not match [`TIMESTAMP_FORMAT`], or there
/// are fewer temperatures than timestamps.
pub fn format(city: &str, raw: &[u8]) -> Result<WeatherDisplay> {
    let response: ForecastResponse = serde_json::from_slice(raw).map_err(|e| {
        CityWeatherError::malformed_payload(CityWeatherError::wrap(
            "error decoding response from Weather API",
            e,
        ))
    })?;
    let hourly = response.hourly;

    if hourly.temperature.len() < hourly.time.len() {
        return Err(CityWeatherError::malformed_payload(format!(
            "error decoding response from Weather API: {} timestamps but only {} temperatures",
            hourly.time.len(),
            hourly.temperature.len()
        )));
    }

    let forecasts = hourly
        .time
        .iter()
        .zip(&hourly.temperature)
        .map(|(time, temperature)| {
            Ok(ForecastPoint::new(
                format_date(time)?,
                format_temperature(*temperature),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(WeatherDisplay {
        city: city.to_string(),
        forecasts,
    })
}

/// `"2024-01-01T15:04"` -> `"Mon 15:04"`
fn format_date(timestamp: &str) -> Result<String> {
    let parsed = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|e| {
        CityWeatherError::malformed_payload(CityWeatherError::wrap("error parsing time", e))
    })?;
    // chrono accepts single-digit fields and a signed year; only the exact layout is valid
    if parsed.format(TIMESTAMP_FORMAT).to_string() != timestamp {
        return Err(CityWeatherError::malformed_payload(CityWeatherError::wrap(
            "error parsing time",
            format!("{timestamp:?} does not match YYYY-MM-DDTHH:MM"),
        )));
    }
    Ok(parsed.format(LABEL_FORMAT).to_string())
}

/// Format temperature with unit
fn format_temperature(celsius: f64) -> String {
    format!("{celsius:.1}°C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rstest::rstest;

    fn payload(times: &[&str], temperatures: &[f64]) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "latitude": 48.86,
            "longitude": 2.35,
            "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
            "hourly": {"time": times, "temperature_2m": temperatures}
        }))
        .unwrap()
    }

    #[test]
    fn test_format_paris_example() {
        let raw = payload(&["2024-01-01T00:00", "2024-01-01T01:00"], &[5.2, 5.8]);

        let display = format("Paris", &raw).unwrap();

        assert_eq!(display.city, "Paris");
        assert_eq!(
            display.forecasts,
            vec![
                ForecastPoint::new("Mon 00:00", "5.2°C"),
                ForecastPoint::new("Mon 01:00", "5.8°C"),
            ]
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        let raw = payload(
            &["2024-03-09T22:00", "2024-03-09T23:00", "2024-03-10T00:00"],
            &[1.0, -0.4, -1.26],
        );

        let first = format("Oslo", &raw).unwrap();
        let second = format("Oslo", &raw).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first
                .forecasts
                .iter()
                .map(|f| f.date.as_str())
                .collect::<Vec<_>>(),
            vec!["Sat 22:00", "Sat 23:00", "Sun 00:00"]
        );
    }

    #[test]
    fn test_format_empty_arrays() {
        let raw = payload(&[], &[]);

        let display = format("Nowhere", &raw).unwrap();

        assert_eq!(display.city, "Nowhere");
        assert!(display.forecasts.is_empty());
    }

    #[rstest]
    #[case(5.2, "5.2°C")]
    #[case(-3.0, "-3.0°C")]
    #[case(12.0, "12.0°C")]
    #[case(21.36, "21.4°C")]
    #[case(0.04, "0.0°C")]
    fn test_format_temperature(#[case] celsius: f64, #[case] expected: &str) {
        assert_eq!(format_temperature(celsius), expected);
    }

    #[rstest]
    #[case("2024-01-01 00:00")]
    #[case("2024-01-01T00:00:00")]
    #[case("2024-13-01T00:00")]
    #[case("01/01/2024 00:00")]
    #[case("")]
    #[case("2024-1-01T00:00")]
    #[case("2024-01-1T0:00")]
    #[case("2024-01-01T00:0")]
    #[case("+2024-01-01T00:00")]
    fn test_format_rejects_bad_timestamp(#[case] timestamp: &str) {
        let raw = payload(&[timestamp], &[1.0]);

        let err = format("Paris", &raw).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
        assert!(err.to_string().starts_with("error parsing time: "));
    }

    #[rstest]
    #[case(b"not json".as_slice())]
    #[case(br#"{"error": true, "reason": "Latitude must be in range"}"#.as_slice())]
    #[case(br#"{"hourly": {"time": ["2024-01-01T00:00"]}}"#.as_slice())]
    fn test_format_rejects_unexpected_shape(#[case] raw: &[u8]) {
        let err = format("Paris", raw).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
        assert!(
            err.to_string()
                .starts_with("error decoding response from Weather API: ")
        );
    }

    #[test]
    fn test_format_rejects_missing_temperatures() {
        let raw = payload(&["2024-01-01T00:00", "2024-01-01T01:00"], &[5.2]);

        let err = format("Paris", &raw).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn test_format_ignores_extra_temperatures() {
        let raw = payload(&["2024-01-01T00:00"], &[5.2, 9.9]);

        let display = format("Paris", &raw).unwrap();

        assert_eq!(display.forecasts, vec![ForecastPoint::new("Mon 00:00", "5.2°C")]);
    }
}
