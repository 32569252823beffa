//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ApiKeyRepository, ReadingRepository};
use crate::{
    db::{self, DbPool},
    error::AppError,
    models::{
        api_key::{ApiKey, NewApiKey},
        reading::SensorReading,
    },
};

/// `api_keys` table access.
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: DbPool,
}

impl PostgresApiKeyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn find_candidates(
        &self,
        key_prefix: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ApiKey>, AppError> {
        let keys = sqlx::query_as::<_, ApiKey>(
            r#"
            SELECT id, key_hash, key_prefix, owner, is_enabled, created_at, expires_at, notes
            FROM api_keys
            WHERE is_enabled = true
              AND key_prefix = $1
              AND (expires_at IS NULL OR expires_at > $2)
            "#,
        )
        .bind(key_prefix)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }

    async fn insert(&self, key: NewApiKey) -> Result<ApiKey, AppError> {
        let stored = sqlx::query_as::<_, ApiKey>(
            r#"
            INSERT INTO api_keys (key_hash, key_prefix, owner, is_enabled, expires_at, notes)
            VALUES ($1, $2, $3, true, $4, $5)
            RETURNING id, key_hash, key_prefix, owner, is_enabled, created_at, expires_at, notes
            "#,
        )
        .bind(key.key_hash)
        .bind(key.key_prefix)
        .bind(key.owner)
        .bind(key.expires_at)
        .bind(key.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }
}

/// `sensor_readings` table access.
#[derive(Debug, Clone)]
pub struct PostgresReadingRepository {
    pool: DbPool,
}

impl PostgresReadingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingRepository for PostgresReadingRepository {
    async fn insert(&self, temperature: &str) -> Result<SensorReading, AppError> {
        let reading = sqlx::query_as::<_, SensorReading>(
            r#"
            INSERT INTO sensor_readings (temperature)
            VALUES ($1)
            RETURNING id, temperature, recorded_at
            "#,
        )
        .bind(temperature)
        .fetch_one(&self.pool)
        .await?;

        Ok(reading)
    }

    async fn latest(&self) -> Result<Option<SensorReading>, AppError> {
        let reading = sqlx::query_as::<_, SensorReading>(
            r#"
            SELECT id, temperature, recorded_at
            FROM sensor_readings
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(reading)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<SensorReading>, AppError> {
        let readings = sqlx::query_as::<_, SensorReading>(
            r#"
            SELECT id, temperature, recorded_at
            FROM sensor_readings
            ORDER BY recorded_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(readings)
    }

    async fn ping(&self) -> Result<(), AppError> {
        db::ping(&self.pool).await?;
        Ok(())
    }
}
