//! Coordinate Resolution Module
//!
//! Resolves a city name to coordinates, using the city store as a
//! write-through cache in front of the geocoding service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::Result;
use crate::geocoding::Geocoder;
use crate::models::Coordinate;
use crate::store::CityStore;

/// Service for resolving city names
#[derive(Clone)]
pub struct CoordinateResolver {
    store: Arc<dyn CityStore>,
    geocoder: Arc<dyn Geocoder>,
}

impl CoordinateResolver {
    #[must_use]
    pub fn new(store: Arc<dyn CityStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    /// Resolve `city` to a coordinate.
    ///
    /// A stored coordinate is authoritative and returned without contacting
    /// the geocoder. On a miss (or a failed store read) the geocoder is asked,
    /// and its answer is inserted before being returned. The read and the
    /// insert are not atomic.
    ///
    /// # Errors
    ///
    /// Propagates the geocoder's `UpstreamLookup` error, or a `Store` error
    /// if the insert fails.
    pub async fn resolve(&self, city: &str) -> Result<Coordinate> {
        debug!("Resolving city: {:?}", city);

        match self.store.find_coordinate(city).await {
            Ok(Some(coordinate)) => {
                info!(city, "found city in store");
                return Ok(coordinate);
            }
            Ok(None) => debug!(city, "city not in store"),
            Err(e) => warn!(city, error = %e, "store lookup failed, falling back to geocoding"),
        }

        let coordinate = self.geocoder.lookup(city).await?;
        self.store.insert_city(city, coordinate).await?;

        info!(
            city,
            "stored geocoded city at ({:.4}, {:.4})", coordinate.latitude, coordinate.longitude
        );
        Ok(coordinate)
    }
}
