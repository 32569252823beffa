//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    config::AdminCredentials,
    db::DbPool,
    repositories::{
        ApiKeyRepository, PostgresApiKeyRepository, PostgresReadingRepository, ReadingRepository,
    },
    services::api_key_service::ApiKeyHasher,
};

/// Cloned into each request by axum; everything inside is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub api_keys: Arc<dyn ApiKeyRepository>,
    pub readings: Arc<dyn ReadingRepository>,
    pub hasher: ApiKeyHasher,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    pub fn new(
        api_keys: Arc<dyn ApiKeyRepository>,
        readings: Arc<dyn ReadingRepository>,
        hasher: ApiKeyHasher,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            api_keys,
            readings,
            hasher,
            admin: Arc::new(admin),
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DbPool, admin: AdminCredentials) -> Self {
        Self::new(
            Arc::new(PostgresApiKeyRepository::new(pool.clone())),
            Arc::new(PostgresReadingRepository::new(pool)),
            ApiKeyHasher::new(),
            admin,
        )
    }
}
