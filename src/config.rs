//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;
use std::fmt;

/// Server configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `ADMIN_USERNAME` (required): username accepted by `POST /login`
/// - `ADMIN_PASSWORD` (required): password accepted by `POST /login`
/// - `SERVER_HOST` (optional): bind address, defaults to 0.0.0.0
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
#[derive(Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub admin_username: String,

    pub admin_password: String,

    #[serde(default = "default_host")]
    pub server_host: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

/// Database-only configuration used by the command line tools.
///
/// The tools never serve HTTP, so they do not require the admin credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

/// Credentials accepted by the login endpoint.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL, ADMIN_PASSWORD)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials {
            username: self.admin_username.clone(),
            password: self.admin_password.clone(),
        }
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            database_url: self.database_url.clone(),
            database_max_connections: self.database_max_connections,
        }
    }
}

impl DatabaseConfig {
    /// Load the database settings from the environment (and an optional `.env`).
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<DatabaseConfig>()
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("database_max_connections", &self.database_max_connections)
            .finish()
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
