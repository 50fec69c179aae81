//! Location models: coordinates and the city rows they are cached in

use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as the fixed 6-decimal pair sent to the forecast service
    #[must_use]
    pub fn format_query(&self) -> (String, String) {
        (
            format!("{:.6}", self.latitude),
            format!("{:.6}", self.longitude),
        )
    }
}

/// A cached city row. Rows are only ever inserted, never updated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CityRecord {
    /// Insertion-order key
    pub id: i64,
    pub name: String,
    pub coordinate: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_query_fixed_precision() {
        let coordinate = Coordinate::new(48.8566, 2.3522);
        let (lat, lon) = coordinate.format_query();
        assert_eq!(lat, "48.856600");
        assert_eq!(lon, "2.352200");
    }

    #[test]
    fn test_format_query_negative() {
        let coordinate = Coordinate::new(-33.868_82, -151.209_296_5);
        let (lat, lon) = coordinate.format_query();
        assert_eq!(lat, "-33.868820");
        assert_eq!(lon, "-151.209297");
    }
}
