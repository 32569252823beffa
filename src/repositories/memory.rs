//! In-memory repository implementations, used by tests and local experiments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{ApiKeyRepository, ReadingRepository};
use crate::{
    error::AppError,
    models::{
        api_key::{ApiKey, NewApiKey},
        reading::SensorReading,
    },
};

#[derive(Debug, Default, Clone)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<Vec<ApiKey>>>,
}

impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the enabled flag of a stored key. Returns false if no such key exists.
    pub async fn set_enabled(&self, id: i64, is_enabled: bool) -> bool {
        let mut keys = self.keys.write().await;
        match keys.iter_mut().find(|key| key.id == id) {
            Some(key) => {
                key.is_enabled = is_enabled;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn find_candidates(
        &self,
        key_prefix: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ApiKey>, AppError> {
        let keys = self.keys.read().await;
        Ok(keys
            .iter()
            .filter(|key| key.key_prefix == key_prefix && key.is_usable_at(now))
            .cloned()
            .collect())
    }

    async fn insert(&self, key: NewApiKey) -> Result<ApiKey, AppError> {
        let mut keys = self.keys.write().await;
        let stored = ApiKey {
            id: keys.len() as i64 + 1,
            key_hash: key.key_hash,
            key_prefix: key.key_prefix,
            owner: key.owner,
            is_enabled: true,
            created_at: Utc::now(),
            expires_at: key.expires_at,
            notes: key.notes,
        };
        keys.push(stored.clone());
        Ok(stored)
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryReadingRepository {
    readings: Arc<RwLock<Vec<SensorReading>>>,
}

impl InMemoryReadingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with readings taken at explicit times.
    pub async fn insert_at(&self, temperature: &str, recorded_at: DateTime<Utc>) -> SensorReading {
        let mut readings = self.readings.write().await;
        let reading = SensorReading {
            id: readings.len() as i64 + 1,
            temperature: temperature.to_string(),
            recorded_at,
        };
        readings.push(reading.clone());
        reading
    }

    pub async fn len(&self) -> usize {
        self.readings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.readings.read().await.is_empty()
    }

    async fn newest_first(&self) -> Vec<SensorReading> {
        let mut readings = self.readings.read().await.clone();
        readings.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        readings
    }
}

#[async_trait]
impl ReadingRepository for InMemoryReadingRepository {
    async fn insert(&self, temperature: &str) -> Result<SensorReading, AppError> {
        Ok(self.insert_at(temperature, Utc::now()).await)
    }

    async fn latest(&self) -> Result<Option<SensorReading>, AppError> {
        Ok(self.newest_first().await.into_iter().next())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<SensorReading>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.newest_first().await.into_iter().take(limit).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn readings_come_back_newest_first() {
        let repo = InMemoryReadingRepository::new();
        let base = Utc::now();
        repo.insert_at("20.0", base - Duration::minutes(2)).await;
        repo.insert_at("22.0", base).await;
        repo.insert_at("21.0", base - Duration::minutes(1)).await;

        let latest = repo.latest().await.unwrap().unwrap();
        assert_eq!(latest.temperature, "22.0");

        let listed: Vec<_> = repo
            .list_recent(10)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.temperature)
            .collect();
        assert_eq!(listed, vec!["22.0", "21.0", "20.0"]);
    }

    #[tokio::test]
    async fn equal_timestamps_fall_back_to_insertion_order() {
        let repo = InMemoryReadingRepository::new();
        let at = Utc::now();
        repo.insert_at("1", at).await;
        repo.insert_at("2", at).await;

        let listed = repo.list_recent(1).await.unwrap();
        assert_eq!(listed[0].temperature, "2");
    }

    #[tokio::test]
    async fn candidates_exclude_disabled_and_foreign_prefixes() {
        let repo = InMemoryApiKeyRepository::new();
        let new_key = |prefix: &str| NewApiKey {
            key_hash: "hash".into(),
            key_prefix: prefix.into(),
            owner: "sensor".into(),
            expires_at: None,
            notes: None,
        };
        let first = repo.insert(new_key("aaaaaaaa")).await.unwrap();
        repo.insert(new_key("bbbbbbbb")).await.unwrap();

        let now = Utc::now();
        assert_eq!(repo.find_candidates("aaaaaaaa", now).await.unwrap().len(), 1);

        assert!(repo.set_enabled(first.id, false).await);
        assert!(repo.find_candidates("aaaaaaaa", now).await.unwrap().is_empty());
    }
}
