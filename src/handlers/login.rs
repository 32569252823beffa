//! Admin login check.

use crate::{
    error::AppError,
    extract::Json,
    models::login::{LoginRequest, MessageResponse},
    services::login_service,
    state::AppState,
};
use axum::extract::State;

/// Check a username/password pair against the configured admin credentials.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Login successful"}`
/// - **Error (401)**: Any other pair
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if let Err(err) =
        login_service::check_credentials(&state.admin, &request.username, &request.password)
    {
        tracing::warn!(username = %request.username, "login rejected");
        return Err(err);
    }

    Ok(Json(MessageResponse::new("Login successful")))
}
