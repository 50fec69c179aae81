use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::AppConfig;
use crate::geocoding::OpenMeteoGeocoder;
use crate::state::AppState;
use crate::store::{self, PgCityStore};
use crate::weather::OpenMeteoForecast;
use crate::{CityWeatherError, Result};

/// The full application: routes plus request logging and panic recovery.
pub fn app(state: AppState) -> Router {
    api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

/// Build the production state: Postgres store and Open-Meteo clients.
///
/// # Errors
///
/// Fails if the store is unreachable or the HTTP client cannot be built.
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let pool = store::create_pool(config.expose_database_url()).await?;
    tracing::info!("Database pool created");

    let client = reqwest::Client::builder()
        .user_agent(concat!("cityweather/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CityWeatherError::config(format!("failed to create HTTP client: {e}")))?;

    Ok(AppState::new(
        Arc::new(PgCityStore::new(pool)),
        Arc::new(OpenMeteoGeocoder::new(
            client.clone(),
            config.upstream.geocoding_base_url.clone(),
        )),
        Arc::new(OpenMeteoForecast::new(
            client,
            config.upstream.weather_base_url.clone(),
        )),
    ))
}

/// Serve `state` on the configured port until the process is stopped.
///
/// # Errors
///
/// Fails if the listener cannot be bound or the server stops with an I/O error.
pub async fn run(config: &AppConfig, state: AppState) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server running at http://localhost:{}", config.port);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
