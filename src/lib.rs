//! Sensor Ingest Service
//!
//! A small REST API that accepts temperature readings from embedded devices and
//! serves them back. Devices authenticate with API keys that are stored only as
//! Argon2 hashes.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, behind repository traits
//! - **Authentication**: `x-api-key` header verified against Argon2id hashes
//! - **Format**: JSON requests/responses

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

pub use app::router;
pub use state::AppState;
