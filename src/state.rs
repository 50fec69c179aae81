//! Application state shared across handlers.

use std::sync::Arc;

use crate::geocoding::Geocoder;
use crate::history::HistoryReader;
use crate::location_resolver::CoordinateResolver;
use crate::store::CityStore;
use crate::weather::ForecastSource;

/// Application state shared across all handlers.
///
/// Cheap to clone; every collaborator sits behind an `Arc` so tests can
/// swap in in-memory or stubbed implementations.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    resolver: CoordinateResolver,
    forecast_source: Arc<dyn ForecastSource>,
    history: HistoryReader,
}

impl AppState {
    /// Wire the components around a single store handle.
    #[must_use]
    pub fn new(
        store: Arc<dyn CityStore>,
        geocoder: Arc<dyn Geocoder>,
        forecast_source: Arc<dyn ForecastSource>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                resolver: CoordinateResolver::new(store.clone(), geocoder),
                forecast_source,
                history: HistoryReader::new(store),
            }),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &CoordinateResolver {
        &self.inner.resolver
    }

    #[must_use]
    pub fn forecast_source(&self) -> &dyn ForecastSource {
        self.inner.forecast_source.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryReader {
        &self.inner.history
    }
}
