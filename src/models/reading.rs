//! Sensor reading data models and API request/response types.
//!
//! This module defines:
//! - `SensorReading`: Database entity representing one stored measurement
//! - `CreateReadingRequest` / `CreateReadingResponse`: ingestion payloads
//! - `ReadingResponse`, `LatestReading`, `ListReadingsQuery`: retrieval payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a sensor reading record from the database.
///
/// # Database Table
///
/// Maps to the `sensor_readings` table. The temperature is kept exactly as the
/// device sent it; `recorded_at` is assigned by the database on insert.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SensorReading {
    pub id: i64,

    /// Temperature as the raw text submitted by the device.
    pub temperature: String,

    pub recorded_at: DateTime<Utc>,
}

/// Request body for recording a reading.
///
/// # JSON Example
///
/// ```json
/// { "temperature": "23.5" }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateReadingRequest {
    /// Must parse as a finite number, but is stored as sent.
    pub temperature: String,
}

/// Response body for a recorded reading.
///
/// ```json
/// { "message": "Reading recorded", "temperature": 23.5 }
/// ```
#[derive(Debug, Serialize)]
pub struct CreateReadingResponse {
    pub message: String,
    pub temperature: f64,
}

/// A reading as returned by the retrieval endpoints.
///
/// ```json
/// { "temperature": "23.5", "datetime": "2025-12-20T10:00:00Z" }
/// ```
#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub temperature: String,
    pub datetime: DateTime<Utc>,
}

impl From<SensorReading> for ReadingResponse {
    fn from(reading: SensorReading) -> Self {
        Self {
            temperature: reading.temperature,
            datetime: reading.recorded_at,
        }
    }
}

/// Body of `GET /api/readings/latest`.
///
/// Serializes as either a reading or `{"message": "No data"}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LatestReading {
    Reading(ReadingResponse),
    NoData { message: String },
}

impl LatestReading {
    pub fn no_data() -> Self {
        LatestReading::NoData {
            message: "No data".to_string(),
        }
    }
}

/// Query string of `GET /api/readings`.
#[derive(Debug, Deserialize)]
pub struct ListReadingsQuery {
    /// Requested number of readings; clamped into `1..=200`, defaults to 20.
    pub limit: Option<i64>,
}
