//! Error types and handling for the `CityWeather` service

use std::fmt::Display;

use thiserror::Error;

/// Main error type for the `CityWeather` service.
///
/// Every variant carries the full, already-contextualised message. `Display`
/// prints the message alone so that the HTTP layer can flatten any error into
/// the `{"error": ...}` body without adding a prefix.
#[derive(Error, Debug)]
pub enum CityWeatherError {
    /// Geocoding request failed or returned no match
    #[error("{message}")]
    UpstreamLookup { message: String },

    /// Forecast request failed or its body could not be read
    #[error("{message}")]
    UpstreamFetch { message: String },

    /// Forecast payload did not decode or contained a bad timestamp
    #[error("{message}")]
    MalformedPayload { message: String },

    /// Store connectivity or query failure
    #[error("{message}")]
    Store { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Coarse classification of a [`CityWeatherError`], handy for assertions
/// and for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UpstreamLookup,
    UpstreamFetch,
    MalformedPayload,
    Store,
    Config,
}

impl CityWeatherError {
    /// Create a new geocoding error
    pub fn upstream_lookup<S: Into<String>>(message: S) -> Self {
        Self::UpstreamLookup {
            message: message.into(),
        }
    }

    /// Create a new forecast fetch error
    pub fn upstream_fetch<S: Into<String>>(message: S) -> Self {
        Self::UpstreamFetch {
            message: message.into(),
        }
    }

    /// Create a new payload error
    pub fn malformed_payload<S: Into<String>>(message: S) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wrap `source` as `"<context>: <source>"`, the shape every upstream
    /// error message uses.
    pub(crate) fn wrap(context: &str, source: impl Display) -> String {
        format!("{context}: {source}")
    }

    /// Classify the error without inspecting its message
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UpstreamLookup { .. } => ErrorKind::UpstreamLookup,
            Self::UpstreamFetch { .. } => ErrorKind::UpstreamFetch,
            Self::MalformedPayload { .. } => ErrorKind::MalformedPayload,
            Self::Store { .. } => ErrorKind::Store,
            Self::Config { .. } => ErrorKind::Config,
        }
    }
}

impl From<sqlx::Error> for CityWeatherError {
    fn from(err: sqlx::Error) -> Self {
        Self::store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let lookup_err = CityWeatherError::upstream_lookup("no results returned from Geo API");
        assert!(matches!(lookup_err, CityWeatherError::UpstreamLookup { .. }));
        assert_eq!(lookup_err.kind(), ErrorKind::UpstreamLookup);

        let fetch_err = CityWeatherError::upstream_fetch("connection refused");
        assert_eq!(fetch_err.kind(), ErrorKind::UpstreamFetch);

        let payload_err = CityWeatherError::malformed_payload("bad json");
        assert_eq!(payload_err.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn test_display_is_bare_message() {
        let err = CityWeatherError::upstream_lookup("no results returned from Geo API");
        assert_eq!(err.to_string(), "no results returned from Geo API");

        let err = CityWeatherError::store("pool timed out");
        assert_eq!(err.to_string(), "pool timed out");
    }

    #[test]
    fn test_wrap_message() {
        let message = CityWeatherError::wrap("error making request to Geo API", "timeout");
        assert_eq!(message, "error making request to Geo API: timeout");
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: CityWeatherError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.kind(), ErrorKind::Store);
    }
}
