//! Reading service - validation and storage of sensor readings.

use crate::{
    error::AppError,
    models::reading::{LatestReading, SensorReading},
    repositories::ReadingRepository,
};

pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 200;

/// Parse a submitted temperature as a finite number.
///
/// Surrounding whitespace is ignored. The parsed value is only used for
/// validation and for echoing back to the device; storage keeps the raw text.
pub fn parse_temperature(raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::InvalidRequest("Temperature must be a number".to_string()))
}

/// Resolve the `limit` query parameter: default 20, clamped into `1..=200`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}

/// Validate and persist a reading, returning the parsed value alongside the stored row.
pub async fn record_reading(
    repo: &dyn ReadingRepository,
    temperature: &str,
) -> Result<(f64, SensorReading), AppError> {
    let value = parse_temperature(temperature)?;
    let reading = repo.insert(temperature).await?;
    Ok((value, reading))
}

pub async fn latest_reading(repo: &dyn ReadingRepository) -> Result<LatestReading, AppError> {
    Ok(match repo.latest().await? {
        Some(reading) => LatestReading::Reading(reading.into()),
        None => LatestReading::no_data(),
    })
}
