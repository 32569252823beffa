//! Check that the configured database is reachable.
//!
//! Prints a confirmation on success. On failure the error is returned from
//! `main`, which prints it and exits non-zero.

use anyhow::Context;
use sensor_ingest_service::{config::DatabaseConfig, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env().context("Failed to read DATABASE_URL")?;

    db::check_connection(&config)
        .await
        .context("Database check failed")?;

    println!("Connected successfully");

    Ok(())
}
