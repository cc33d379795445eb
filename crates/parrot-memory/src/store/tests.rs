use super::Store;
use parrot_core::config::MemoryConfig;
use parrot_core::message::InteractionRecord;
use parrot_core::traits::InteractionStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Create an in-memory store for testing.
async fn test_store(table: &str) -> Store {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .unwrap();
    Store::run_migrations(&pool, table).await.unwrap();
    Store {
        pool,
        table: table.to_string(),
    }
}

fn record(screen_name: &str, date: &str, lang: &str) -> InteractionRecord {
    InteractionRecord {
        screen_name: screen_name.to_string(),
        tweet: format!("@bot translate this #{lang}"),
        date_tweeted: date.to_string(),
        target_language: lang.to_string(),
        translated_tweet: format!("@{screen_name} translated"),
    }
}

#[tokio::test]
async fn test_save_and_read_back() {
    let store = test_store("translations").await;
    let rec = record("alice", "2024-03-09 07:05:01", "es");
    store.save(&rec).await.unwrap();

    let rows = store.recent(None, 10).await.unwrap();
    assert_eq!(rows, vec![rec]);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicates_are_kept() {
    let store = test_store("translations").await;
    let rec = record("alice", "2024-03-09 07:05:01", "es");
    store.save(&rec).await.unwrap();
    store.save(&rec).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_recent_newest_first_with_limit() {
    let store = test_store("translations").await;
    store.save(&record("alice", "2024-01-01 00:00:00", "es")).await.unwrap();
    store.save(&record("bob", "2024-01-03 00:00:00", "fr")).await.unwrap();
    store.save(&record("carol", "2024-01-02 00:00:00", "de")).await.unwrap();

    let rows = store.recent(None, 2).await.unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.screen_name.as_str()).collect();
    assert_eq!(names, ["bob", "carol"]);
}

#[tokio::test]
async fn test_recent_filters_by_screen_name() {
    let store = test_store("translations").await;
    store.save(&record("alice", "2024-01-01 00:00:00", "es")).await.unwrap();
    store.save(&record("bob", "2024-01-02 00:00:00", "fr")).await.unwrap();
    store.save(&record("alice", "2024-01-03 00:00:00", "unknown")).await.unwrap();

    let rows = store.recent(Some("alice"), 10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].target_language, "unknown");
    assert_eq!(rows[1].target_language, "es");
}

#[tokio::test]
async fn test_custom_table_name() {
    let store = test_store("mentions_2024").await;
    store.save(&record("alice", "2024-01-01 00:00:00", "pt")).await.unwrap();
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mentions_2024")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let store = test_store("translations").await;
    store.save(&record("alice", "2024-01-01 00:00:00", "es")).await.unwrap();
    Store::run_migrations(store.pool(), "translations").await.unwrap();
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_new_rejects_invalid_table() {
    let config = MemoryConfig {
        db_path: ":memory:".to_string(),
        table: "bad-name".to_string(),
    };
    let err = Store::new(&config).await.err().unwrap();
    assert!(err.to_string().contains("invalid table name"));
}

#[tokio::test]
async fn test_new_creates_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data/interactions.db");
    let config = MemoryConfig {
        db_path: db_path.to_str().unwrap().to_string(),
        table: "translations".to_string(),
    };
    let store = Store::new(&config).await.unwrap();
    store.save(&record("alice", "2024-01-01 00:00:00", "zh")).await.unwrap();
    assert!(db_path.exists());

    // Reopening sees the earlier write.
    let reopened = Store::new(&config).await.unwrap();
    assert_eq!(reopened.count().await.unwrap(), 1);
}
