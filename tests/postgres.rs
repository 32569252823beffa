//! PostgreSQL repository tests.
//!
//! These need a reachable server in `DATABASE_URL`; each test gets a fresh
//! database with the migrations applied. Run with `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use sensor_ingest_service::{
    models::api_key::NewApiKey,
    repositories::{
        ApiKeyRepository, PostgresApiKeyRepository, PostgresReadingRepository, ReadingRepository,
    },
};
use sqlx::PgPool;

fn new_key(prefix: &str, expires_at: Option<chrono::DateTime<Utc>>) -> NewApiKey {
    NewApiKey {
        key_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        key_prefix: prefix.to_string(),
        owner: "esp32_device".to_string(),
        expires_at,
        notes: Some("bench".to_string()),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn candidates_filter_prefix_enabled_and_expiry(pool: PgPool) {
    let repo = PostgresApiKeyRepository::new(pool.clone());
    let now = Utc::now();

    let live = repo.insert(new_key("aaaaaaaa", None)).await.unwrap();
    let future = repo
        .insert(new_key("aaaaaaaa", Some(now + Duration::days(1))))
        .await
        .unwrap();
    repo.insert(new_key("aaaaaaaa", Some(now - Duration::days(1))))
        .await
        .unwrap();
    let disabled = repo.insert(new_key("aaaaaaaa", None)).await.unwrap();
    repo.insert(new_key("bbbbbbbb", None)).await.unwrap();

    sqlx::query("UPDATE api_keys SET is_enabled = false WHERE id = $1")
        .bind(disabled.id)
        .execute(&pool)
        .await
        .unwrap();

    let mut ids: Vec<i64> = repo
        .find_candidates("aaaaaaaa", now)
        .await
        .unwrap()
        .into_iter()
        .map(|key| key.id)
        .collect();
    ids.sort();

    assert_eq!(ids, vec![live.id, future.id]);
    assert!(live.is_enabled);
    assert_eq!(live.notes.as_deref(), Some("bench"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn readings_are_listed_newest_first_with_limit(pool: PgPool) {
    let repo = PostgresReadingRepository::new(pool.clone());
    let now = Utc::now();

    for (i, temperature) in ["20.1", "20.2", "20.3", "20.4", "20.5"].iter().enumerate() {
        sqlx::query("INSERT INTO sensor_readings (temperature, recorded_at) VALUES ($1, $2)")
            .bind(*temperature)
            .bind(now - Duration::minutes(10 - i as i64))
            .execute(&pool)
            .await
            .unwrap();
    }

    let listed: Vec<String> = repo
        .list_recent(2)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.temperature)
        .collect();
    assert_eq!(listed, vec!["20.5", "20.4"]);

    let latest = repo.latest().await.unwrap().unwrap();
    assert_eq!(latest.temperature, "20.5");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn empty_table_has_no_latest(pool: PgPool) {
    let repo = PostgresReadingRepository::new(pool);

    assert!(repo.latest().await.unwrap().is_none());
    assert!(repo.list_recent(20).await.unwrap().is_empty());
    repo.ping().await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn insert_keeps_raw_temperature_text(pool: PgPool) {
    let repo = PostgresReadingRepository::new(pool);

    let stored = repo.insert(" 23.50").await.unwrap();

    assert_eq!(stored.temperature, " 23.50");
    assert_eq!(repo.latest().await.unwrap().unwrap().id, stored.id);
}
