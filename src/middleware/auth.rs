//! API key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the API key from the `x-api-key` header
//! 2. Verify it against the stored key hashes
//! 3. Inject authentication context into the request
//! 4. Reject unauthorized requests with HTTP 401

use crate::{error::AppError, services::api_key_service, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Header devices put their raw API key in.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authentication context attached to authenticated requests.
///
/// Handlers extract it with `Extension<AuthContext>` to know which key was used.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// ID of the authenticated API key
    pub api_key_id: i64,

    /// Owner label the key was provisioned for
    pub owner: String,
}

/// API key authentication middleware function.
///
/// # Flow
///
/// 1. Read the `x-api-key` header
/// 2. Look up enabled, unexpired keys sharing its prefix
/// 3. Verify the header value against each candidate hash
/// 4. If one matches: inject `AuthContext` into request, call next handler
/// 5. Otherwise: return 401 Unauthorized error
///
/// Runs before the body is read, so an invalid key is rejected whatever the body holds.
///
/// # Headers
///
/// ```text
/// x-api-key: 3q2-7wXk...
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(api_key) = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
    else {
        tracing::debug!("request without API key header rejected");
        return Err(AppError::InvalidApiKey);
    };

    let Some(key) =
        api_key_service::authenticate(state.api_keys.as_ref(), &state.hasher, api_key).await?
    else {
        tracing::warn!("request with invalid API key rejected");
        return Err(AppError::InvalidApiKey);
    };

    // Route handlers can now extract this using Extension<AuthContext>
    request.extensions_mut().insert(AuthContext {
        api_key_id: key.id,
        owner: key.owner,
    });

    Ok(next.run(request).await)
}
