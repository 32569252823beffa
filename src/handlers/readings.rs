//! Sensor reading HTTP handlers.
//!
//! This module implements the reading-related API endpoints:
//! - POST /api/readings - Record a reading (requires `x-api-key`)
//! - GET /api/readings/latest - Most recent reading
//! - GET /api/readings?limit=N - Most recent N readings

use crate::{
    error::AppError,
    extract::{Json, Query},
    middleware::auth::AuthContext,
    models::reading::{
        CreateReadingRequest, CreateReadingResponse, LatestReading, ListReadingsQuery,
        ReadingResponse,
    },
    services::reading_service,
    state::AppState,
};
use axum::{Extension, extract::State};

/// Record a reading.
///
/// # Endpoint
///
/// `POST /api/readings`
///
/// # Authentication
///
/// Requires a valid API key in the `x-api-key` header.
///
/// # Request Body
///
/// ```json
/// { "temperature": "23.5" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Reading recorded", "temperature": 23.5}`
/// - **Error (400)**: Temperature is not a number
/// - **Error (415/422)**: Missing JSON content type, or a body that is not `{"temperature": string}`
/// - **Error (401)**: Missing or invalid API key
/// - **Error (500)**: Database error
pub async fn create_reading(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateReadingRequest>,
) -> Result<Json<CreateReadingResponse>, AppError> {
    let (temperature, reading) =
        reading_service::record_reading(state.readings.as_ref(), &request.temperature).await?;

    tracing::info!(
        reading_id = reading.id,
        api_key_id = auth.api_key_id,
        owner = %auth.owner,
        temperature,
        "Reading recorded"
    );

    Ok(Json(CreateReadingResponse {
        message: "Reading recorded".to_string(),
        temperature,
    }))
}

/// Get the most recent reading.
///
/// # Response (200 OK)
///
/// ```json
/// { "temperature": "23.5", "datetime": "2025-12-20T10:00:00Z" }
/// ```
///
/// or, when nothing has been recorded yet:
///
/// ```json
/// { "message": "No data" }
/// ```
pub async fn get_latest_reading(
    State(state): State<AppState>,
) -> Result<Json<LatestReading>, AppError> {
    let latest = reading_service::latest_reading(state.readings.as_ref()).await?;
    Ok(Json(latest))
}

/// List recent readings, newest first.
///
/// # Query Parameters
///
/// - `limit` - number of readings to return, default 20, clamped into 1..=200
pub async fn list_readings(
    State(state): State<AppState>,
    Query(query): Query<ListReadingsQuery>,
) -> Result<Json<Vec<ReadingResponse>>, AppError> {
    let limit = reading_service::clamp_limit(query.limit);

    let readings = state.readings.list_recent(limit).await?;

    Ok(Json(readings.into_iter().map(Into::into).collect()))
}
