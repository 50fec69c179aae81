//! Configuration management for the `CityWeather` service
//!
//! Everything is read from environment variables (optionally seeded from a
//! `.env` file).
//!
//! ## Required
//! - `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_DB` - store credentials
//!
//! ## Optional
//! - `PORT` - listen port (default: 8080)
//! - `GEOCODING_BASE_URL` - geocoding service (default: Open-Meteo)
//! - `WEATHER_BASE_URL` - forecast service (default: Open-Meteo)

use std::net::{Ipv4Addr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};

use crate::CityWeatherError;

/// Store host, fixed by the deployment
pub const DATABASE_HOST: &str = "postgres";
/// Store port, fixed by the deployment
pub const DATABASE_PORT: u16 = 5432;

/// User allowed on `/stats`
pub const STATS_USER: &str = "admin";
/// Password for [`STATS_USER`]
pub const STATS_PASSWORD: &str = "admin";

/// Root configuration structure
#[derive(Clone)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL (contains the password)
    pub database_url: SecretString,
    /// Port to listen on, bound on all interfaces
    pub port: u16,
    /// Upstream service locations
    pub upstream: UpstreamConfig,
}

/// Base URLs of the upstream services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub geocoding_base_url: String,
    pub weather_base_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[REDACTED]")
            .field("port", &self.port)
            .field("upstream", &self.upstream)
            .finish()
    }
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            weather_base_url: default_weather_base_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` first so a local `.env` file is honoured.
    ///
    /// # Errors
    ///
    /// Returns [`CityWeatherError::Config`] if a required variable is missing
    /// or `PORT` is not a valid port number.
    pub fn from_env() -> crate::Result<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                CityWeatherError::config(format!("missing environment variable {key}"))
            })
        };

        let user = required("POSTGRES_USER")?;
        let password = required("POSTGRES_PASSWORD")?;
        let database = required("POSTGRES_DB")?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                CityWeatherError::config(format!("invalid environment variable PORT: {e}"))
            })?,
            None => default_port(),
        };

        let upstream = UpstreamConfig {
            geocoding_base_url: lookup("GEOCODING_BASE_URL")
                .unwrap_or_else(default_geocoding_base_url),
            weather_base_url: lookup("WEATHER_BASE_URL").unwrap_or_else(default_weather_base_url),
        };

        Ok(Self {
            database_url: database_url(&user, &password, &database),
            port,
            upstream,
        })
    }

    /// Socket address the server binds to
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Connection URL with the password exposed, for the pool builder only
    #[must_use]
    pub fn expose_database_url(&self) -> &str {
        self.database_url.expose_secret()
    }
}

fn database_url(user: &str, password: &str, database: &str) -> SecretString {
    SecretString::from(format!(
        "postgres://{}:{}@{DATABASE_HOST}:{DATABASE_PORT}/{}?sslmode=disable",
        urlencoding::encode(user),
        urlencoding::encode(password),
        urlencoding::encode(database),
    ))
}
