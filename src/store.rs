//! City store
//!
//! The `cities` table acts as a write-through cache of geocoded coordinates
//! and as the source of the recent-cities listing. Rows are only ever
//! inserted; the auto-incrementing `id` gives the insertion order.
//!
//! Expected schema (see `sql/cities.sql`):
//! `cities (id SERIAL PRIMARY KEY, name TEXT NOT NULL, lat DOUBLE PRECISION NOT NULL, long DOUBLE PRECISION NOT NULL)`
//!
//! There is no uniqueness constraint on `name`: two concurrent misses for the
//! same city may both insert, and lookups then return whichever row the
//! database yields first.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;

use crate::models::{CityRecord, Coordinate};
use crate::{CityWeatherError, Result};

/// Store handle injected into the resolver and history reader.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Exact, case-sensitive lookup by city name.
    async fn find_coordinate(&self, name: &str) -> Result<Option<Coordinate>>;

    /// Append a new city row.
    async fn insert_city(&self, name: &str, coordinate: Coordinate) -> Result<()>;

    /// Names of the `limit` most recently inserted rows, newest first.
    async fn recent_names(&self, limit: i64) -> Result<Vec<String>>;
}

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns [`CityWeatherError::Store`] if the connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .map_err(|e| {
            CityWeatherError::store(CityWeatherError::wrap("error connecting to store", e))
        })
}

/// `PostgreSQL`-backed [`CityStore`]
#[derive(Clone)]
pub struct PgCityStore {
    pool: PgPool,
}

impl PgCityStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityStore for PgCityStore {
    #[tracing::instrument(name = "query_city", level = "debug", skip(self))]
    async fn find_coordinate(&self, name: &str) -> Result<Option<Coordinate>> {
        let row: Option<(f64, f64)> =
            sqlx::query_as("SELECT lat, long FROM cities WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(latitude, longitude)| Coordinate::new(latitude, longitude)))
    }

    #[tracing::instrument(name = "insert_city", level = "debug", skip(self))]
    async fn insert_city(&self, name: &str, coordinate: Coordinate) -> Result<()> {
        sqlx::query("INSERT INTO cities (name, lat, long) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(coordinate.latitude)
            .bind(coordinate.longitude)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "recent_cities", level = "debug", skip(self))]
    async fn recent_names(&self, limit: i64) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM cities ORDER BY id DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }
}

/// In-memory [`CityStore`] with the same insertion-order semantics as the
/// table. Useful for tests and local runs without a database.
#[derive(Default)]
pub struct MemoryCityStore {
    rows: RwLock<Vec<CityRecord>>,
}

impl MemoryCityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row in insertion order
    pub async fn records(&self) -> Vec<CityRecord> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl CityStore for MemoryCityStore {
    async fn find_coordinate(&self, name: &str) -> Result<Option<Coordinate>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|record| record.name == name)
            .map(|record| record.coordinate))
    }

    async fn insert_city(&self, name: &str, coordinate: Coordinate) -> Result<()> {
        let mut rows = self.rows.write().await;
        let id = rows.last().map_or(1, |record| record.id + 1);
        rows.push(CityRecord {
            id,
            name: name.to_string(),
            coordinate,
        });
        Ok(())
    }

    async fn recent_names(&self, limit: i64) -> Result<Vec<String>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .rev()
            .take(limit)
            .map(|record| record.name.clone())
            .collect())
    }
}
