//! Database connection pool and migration management.
//!
//! This module provides utilities for:
//! - Creating and managing a PostgreSQL connection pool
//! - Running database migrations automatically

use sqlx::{Pool, Postgres};

use crate::config::DatabaseConfig;

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// The pool lives for the whole process; handlers borrow a connection per query
/// and return it when the query completes.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection string is invalid
/// - Cannot connect to PostgreSQL server
/// - Database authentication fails
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Migrations are tracked in the `_sqlx_migrations` table, so each one runs only once.
/// Both the server and the provisioning tool call this, so either can be the
/// first thing run against a fresh database.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Round-trip a trivial query to prove the database is reachable.
pub async fn ping(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Connect with `config`, run `SELECT 1`, and close the pool again whatever the outcome.
pub async fn check_connection(config: &DatabaseConfig) -> Result<(), sqlx::Error> {
    let pool = create_pool(config).await?;
    let result = ping(&pool).await;
    pool.close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn check_connection_reports_invalid_url() {
        let config = DatabaseConfig {
            database_url: "not a connection string".to_string(),
            database_max_connections: 1,
        };

        assert!(check_connection(&config).await.is_err());
    }
}
