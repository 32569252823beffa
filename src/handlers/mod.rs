//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, query string, etc.)
//! 2. Calls into services or repositories
//! 3. Returns HTTP response (JSON, status code)

/// Service health endpoint
pub mod health;
/// Admin login check
pub mod login;
/// Reading ingestion and retrieval endpoints
pub mod readings;
