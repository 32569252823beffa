//! Persistence seams.
//!
//! Handlers and services talk to storage through these traits so the HTTP layer
//! can run against PostgreSQL in production and against in-memory stores in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::{
        api_key::{ApiKey, NewApiKey},
        reading::SensorReading,
    },
};

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryApiKeyRepository, InMemoryReadingRepository};
pub use postgres::{PostgresApiKeyRepository, PostgresReadingRepository};

/// Storage for device API keys.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Keys that may match a presented key starting with `key_prefix`.
    ///
    /// Only enabled keys that have not expired at `now` are returned.
    async fn find_candidates(
        &self,
        key_prefix: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ApiKey>, AppError>;

    /// Insert a new key and return the stored row.
    async fn insert(&self, key: NewApiKey) -> Result<ApiKey, AppError>;
}

/// Storage for sensor readings.
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Store a reading with the current timestamp.
    async fn insert(&self, temperature: &str) -> Result<SensorReading, AppError>;

    /// The newest reading, if any.
    async fn latest(&self) -> Result<Option<SensorReading>, AppError>;

    /// Up to `limit` readings, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<SensorReading>, AppError>;

    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
