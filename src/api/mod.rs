//! Routes and handlers
//!
//! - `GET /` - search form
//! - `GET /stats` - recently queried cities, behind basic auth
//! - `GET /weather?city=<name>` - hourly forecast for a city
//!
//! Any failure while serving a page is flattened into
//! `500 {"error": "<message>"}`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::models::{ForecastPoint, WeatherDisplay};
use crate::state::AppState;
use crate::{CityWeatherError, auth, forecast};

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub cities: Vec<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "weather.html")]
pub struct WeatherTemplate {
    pub city: String,
    pub forecasts: Vec<ForecastPoint>,
}

impl From<WeatherDisplay> for WeatherTemplate {
    fn from(display: WeatherDisplay) -> Self {
        Self {
            city: display.city,
            forecasts: display.forecasts,
        }
    }
}

/// JSON body returned for every internal failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error. Only the message survives into the response.
#[derive(Debug)]
pub struct ApiError(CityWeatherError);

impl From<CityWeatherError> for ApiError {
    fn from(err: CityWeatherError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(kind = ?self.0.kind(), error = %self.0, "Request error");
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// First `city` value in the query string. A missing value becomes `""`.
fn first_city(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find(|(key, _)| key == "city")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/stats", get(stats))
        .route_layer(middleware::from_fn(auth::require_basic_auth));

    Router::new()
        .route("/", get(index))
        .route("/weather", get(weather))
        .merge(protected)
        .with_state(state)
}

async fn index() -> IndexTemplate {
    IndexTemplate
}

#[instrument(skip(state))]
async fn stats(State(state): State<AppState>) -> Result<StatsTemplate, ApiError> {
    let cities = state.history().recent().await?;
    Ok(StatsTemplate { cities })
}

#[instrument(skip(state))]
async fn weather(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<WeatherTemplate, ApiError> {
    let city = first_city(params);
    let coordinate = state.resolver().resolve(&city).await?;
    let raw = state.forecast_source().fetch(coordinate).await?;
    let display = forecast::format(&city, &raw)?;
    Ok(display.into())
}
