//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle validation, hashing and calls into the repositories.

pub mod api_key_service;
pub mod login_service;
pub mod reading_service;
