//! API key service - generation, hashing and verification of device keys.
//!
//! # Key Format
//!
//! A raw key is 32 random bytes encoded as URL-safe base64 without padding
//! (43 characters). The first 8 characters are stored in clear as the key
//! prefix; the whole key is stored only as an Argon2id hash.
//!
//! # Verification
//!
//! 1. Take the prefix of the presented key
//! 2. Load enabled, unexpired keys sharing that prefix
//! 3. Verify the presented key against each stored hash
//! 4. Accept on the first match
//!
//! A stored hash that cannot be parsed or checked counts as a non-match and is
//! logged, it never fails the request.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppError,
    models::api_key::{ApiKey, NewApiKey},
    repositories::ApiKeyRepository,
};

/// Number of leading key characters stored in clear for lookup.
pub const KEY_PREFIX_LEN: usize = 8;

/// Number of random bytes in a generated key.
const KEY_BYTES: usize = 32;

/// Hashes and verifies raw API keys with Argon2id.
#[derive(Clone)]
pub struct ApiKeyHasher {
    argon2: Argon2<'static>,
}

impl Default for ApiKeyHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl std::fmt::Debug for ApiKeyHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyHasher").finish_non_exhaustive()
    }
}

impl ApiKeyHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit Argon2id cost parameters.
    ///
    /// Verification always uses the parameters recorded in the stored hash, so
    /// keys hashed with different costs keep verifying.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash a raw key into a PHC string.
    pub fn hash(&self, raw_key: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw_key.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Hashing(format!("Failed to hash API key: {}", e)))
    }

    /// Check a raw key against one stored hash.
    ///
    /// `Ok(false)` is a clean mismatch; `Err` means the stored hash itself is unusable.
    pub fn verify(&self, raw_key: &str, stored_hash: &str) -> Result<bool, password_hash::Error> {
        let parsed = PasswordHash::new(stored_hash)?;
        match self.argon2.verify_password(raw_key.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// A freshly provisioned key. `raw_key` exists only in this value and is never stored.
#[derive(Debug, Clone)]
pub struct ProvisionedKey {
    pub raw_key: String,
    pub record: ApiKey,
}

/// Options accepted when provisioning a key.
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    pub owner: String,
    pub notes: Option<String>,
    pub expires_days: Option<i64>,
}

/// Generate a new random raw key.
pub fn generate_raw_key() -> String {
    let bytes: [u8; KEY_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Lookup prefix of a presented key, or `None` if the key is too short to match anything.
pub fn key_prefix(raw_key: &str) -> Option<&str> {
    raw_key.get(..KEY_PREFIX_LEN)
}

/// Compute the expiry instant for a key issued at `issued_at`.
fn expiry_from_days(
    issued_at: DateTime<Utc>,
    expires_days: Option<i64>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(days) = expires_days else {
        return Ok(None);
    };

    if days <= 0 {
        return Err(AppError::InvalidRequest(
            "expires-days must be positive".to_string(),
        ));
    }

    Duration::try_days(days)
        .and_then(|offset| issued_at.checked_add_signed(offset))
        .map(Some)
        .ok_or_else(|| AppError::InvalidRequest("expires-days is out of range".to_string()))
}

/// Create, hash and store a new key.
///
/// # Errors
///
/// - `InvalidRequest`: non-positive or overflowing `expires_days`
/// - `Hashing`: Argon2 failed
/// - `Database`: insert failed
pub async fn provision_key(
    repo: &dyn ApiKeyRepository,
    hasher: &ApiKeyHasher,
    options: ProvisionOptions,
) -> Result<ProvisionedKey, AppError> {
    let expires_at = expiry_from_days(Utc::now(), options.expires_days)?;

    let raw_key = generate_raw_key();
    let key_hash = hasher.hash(&raw_key)?;
    let key_prefix = raw_key[..KEY_PREFIX_LEN].to_string();

    let record = repo
        .insert(NewApiKey {
            key_hash,
            key_prefix,
            owner: options.owner,
            expires_at,
            notes: options.notes,
        })
        .await?;

    tracing::info!(key_id = record.id, owner = %record.owner, "API key provisioned");

    Ok(ProvisionedKey { raw_key, record })
}

/// Find the stored key matching `raw_key`.
///
/// Returns `Ok(None)` when nothing matches, including when no keys exist at all.
/// Argon2 work runs on the blocking thread pool.
pub async fn authenticate(
    repo: &dyn ApiKeyRepository,
    hasher: &ApiKeyHasher,
    raw_key: &str,
) -> Result<Option<ApiKey>, AppError> {
    let Some(prefix) = key_prefix(raw_key) else {
        return Ok(None);
    };

    let candidates = repo.find_candidates(prefix, Utc::now()).await?;
    if candidates.is_empty() {
        return Ok(None);
    }

    let hasher = hasher.clone();
    let raw_key = raw_key.to_string();
    tokio::task::spawn_blocking(move || first_match(&hasher, &raw_key, candidates))
        .await
        .map_err(|e| AppError::Hashing(format!("Verification task failed: {}", e)))
}

/// Whether `raw_key` belongs to an enabled, unexpired key.
pub async fn verify_api_key(
    repo: &dyn ApiKeyRepository,
    hasher: &ApiKeyHasher,
    raw_key: &str,
) -> Result<bool, AppError> {
    Ok(authenticate(repo, hasher, raw_key).await?.is_some())
}

fn first_match(hasher: &ApiKeyHasher, raw_key: &str, candidates: Vec<ApiKey>) -> Option<ApiKey> {
    candidates
        .into_iter()
        .find(|candidate| match hasher.verify(raw_key, &candidate.key_hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!(key_id = candidate.id, error = %e, "stored API key hash is unusable");
                false
            }
        })
}
