//! API Key model for device authentication.
//!
//! API keys are presented by devices in the `x-api-key` header. Only an Argon2
//! hash of each key is stored, alongside a short clear-text prefix used to
//! narrow down which hashes need to be checked.

use chrono::{DateTime, Utc};

/// Represents an API key record from the database.
///
/// # Database Table
///
/// Maps to the `api_keys` table with columns:
/// - `id`: Unique identifier (BIGSERIAL)
/// - `key_hash`: Argon2id PHC string of the raw key
/// - `key_prefix`: first 8 characters of the raw key
/// - `owner`: label of the device or person the key was issued to
/// - `is_enabled`: whether the key may be used
/// - `created_at` / `expires_at`: issue time and optional expiry
/// - `notes`: free text
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    pub id: i64,

    /// Argon2id hash in PHC string format (`$argon2id$v=19$...`).
    ///
    /// Verified with the password-hash verifier rather than compared for equality,
    /// since every hash carries its own random salt.
    pub key_hash: String,

    pub key_prefix: String,

    pub owner: String,

    /// Disabled keys are never returned as verification candidates.
    pub is_enabled: bool,

    pub created_at: DateTime<Utc>,

    /// Keys past this instant are rejected. `None` means the key never expires.
    pub expires_at: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

impl ApiKey {
    /// Whether the key can authenticate a request at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_enabled && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// A key row ready to be inserted. The raw key itself is never part of it.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub key_hash: String,
    pub key_prefix: String,
    pub owner: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
