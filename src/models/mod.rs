//! Data models representing database entities and API payloads.

/// API key authentication model
pub mod api_key;
/// Login payloads
pub mod login;
/// Sensor reading model
pub mod reading;
