//! Provision a device API key.
//!
//! Generates a random key, stores its Argon2 hash in `api_keys`, and prints the
//! raw key exactly once. The raw key cannot be recovered afterwards.
//!
//! ```text
//! provision-key --owner greenhouse-esp32 --notes "north wall" --expires-days 365
//! ```

use clap::Parser;
use sensor_ingest_service::{
    config::DatabaseConfig,
    db,
    repositories::PostgresApiKeyRepository,
    services::api_key_service::{self, ApiKeyHasher, ProvisionOptions},
};
use tracing_subscriber::EnvFilter;

/// Create an API key for a device and print it once
#[derive(Debug, Parser)]
#[command(name = "provision-key")]
#[command(version, about, long_about = None)]
struct Args {
    /// Label of the device or person the key is issued to
    #[arg(long, default_value = "esp32_device")]
    owner: String,

    /// Free-text notes stored with the key
    #[arg(long)]
    notes: Option<String>,

    /// Expire the key this many days from now
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    expires_days: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries only the key banner
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = DatabaseConfig::from_env()?;
    let pool = db::create_pool(&config).await?;
    db::run_migrations(&pool).await?;

    let repo = PostgresApiKeyRepository::new(pool.clone());
    let provisioned = api_key_service::provision_key(
        &repo,
        &ApiKeyHasher::new(),
        ProvisionOptions {
            owner: args.owner,
            notes: args.notes,
            expires_days: args.expires_days,
        },
    )
    .await?;

    pool.close().await;

    println!();
    println!("======================== IMPORTANT ========================");
    println!("API KEY (copy this now - it will NOT be stored in the database):");
    println!("{}", provisioned.raw_key);
    println!("API KEY ID (database id): {}", provisioned.record.id);
    if let Some(expires_at) = provisioned.record.expires_at {
        println!("EXPIRES AT: {}", expires_at.to_rfc3339());
    }
    println!("===========================================================");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_defaults_to_esp32_device() {
        let args = Args::try_parse_from(["provision-key"]).unwrap();
        assert_eq!(args.owner, "esp32_device");
        assert_eq!(args.notes, None);
        assert_eq!(args.expires_days, None);
    }

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "provision-key",
            "--owner",
            "greenhouse",
            "--notes",
            "north wall",
            "--expires-days",
            "30",
        ])
        .unwrap();

        assert_eq!(args.owner, "greenhouse");
        assert_eq!(args.notes.as_deref(), Some("north wall"));
        assert_eq!(args.expires_days, Some(30));
    }

    #[test]
    fn rejects_non_positive_expiry() {
        assert!(Args::try_parse_from(["provision-key", "--expires-days", "0"]).is_err());
        assert!(Args::try_parse_from(["provision-key", "--expires-days", "abc"]).is_err());
    }
}
