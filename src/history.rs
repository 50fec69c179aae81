//! Recently queried cities

use std::sync::Arc;

use crate::Result;
use crate::store::CityStore;

/// Number of names shown on the stats page
pub const HISTORY_LIMIT: i64 = 10;

/// Reads the most recently inserted city names
#[derive(Clone)]
pub struct HistoryReader {
    store: Arc<dyn CityStore>,
}

impl HistoryReader {
    #[must_use]
    pub fn new(store: Arc<dyn CityStore>) -> Self {
        Self { store }
    }

    /// Up to [`HISTORY_LIMIT`] names, newest insertion first.
    ///
    /// # Errors
    ///
    /// Returns a `Store` error if the store cannot be queried.
    pub async fn recent(&self) -> Result<Vec<String>> {
        self.store.recent_names(HISTORY_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::store::MemoryCityStore;

    #[tokio::test]
    async fn test_recent_is_capped_and_newest_first() {
        let store = Arc::new(MemoryCityStore::new());
        for i in 0..15 {
            store
                .insert_city(&format!("City {i}"), Coordinate::new(0.0, 0.0))
                .await
                .unwrap();
        }
        let reader = HistoryReader::new(store);

        let names = reader.recent().await.unwrap();

        assert_eq!(names.len(), 10);
        assert_eq!(names.first().map(String::as_str), Some("City 14"));
        assert_eq!(names.last().map(String::as_str), Some("City 5"));
    }

    #[tokio::test]
    async fn test_recent_keeps_duplicates_in_insertion_order() {
        let store = Arc::new(MemoryCityStore::new());
        for name in ["Lima", "Quito", "Lima"] {
            store.insert_city(name, Coordinate::new(0.0, 0.0)).await.unwrap();
        }
        let reader = HistoryReader::new(store);

        assert_eq!(reader.recent().await.unwrap(), vec!["Lima", "Quito", "Lima"]);
    }

    #[tokio::test]
    async fn test_recent_on_empty_store() {
        let reader = HistoryReader::new(Arc::new(MemoryCityStore::new()));
        assert!(reader.recent().await.unwrap().is_empty());
    }
}
