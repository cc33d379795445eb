//! SQLite-backed interaction log.

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use parrot_core::{
    config::{is_valid_table_name, MemoryConfig},
    error::ParrotError,
    message::InteractionRecord,
    shellexpand,
    traits::InteractionStore,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Interaction log backed by one SQLite table.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
    table: String,
}

impl Store {
    /// Open (or create) the database and ensure the table exists.
    pub async fn new(config: &MemoryConfig) -> Result<Self, ParrotError> {
        if !is_valid_table_name(&config.table) {
            return Err(ParrotError::Memory(format!(
                "invalid table name '{}'",
                config.table
            )));
        }

        let db_path = shellexpand(&config.db_path);

        // Ensure parent directory exists.
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ParrotError::Memory(format!("failed to create data dir: {e}")))?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| ParrotError::Memory(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .map_err(|e| ParrotError::Memory(format!("failed to connect to sqlite: {e}")))?;

        Self::run_migrations(&pool, &config.table).await?;

        info!("Interaction store initialized at {db_path} (table {})", config.table);

        Ok(Self {
            pool,
            table: config.table.clone(),
        })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the interaction table and its index. Idempotent.
    async fn run_migrations(pool: &SqlitePool, table: &str) -> Result<(), ParrotError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id               TEXT PRIMARY KEY,
                screen_name      TEXT NOT NULL,
                tweet            TEXT NOT NULL,
                date_tweeted     TEXT NOT NULL,
                target_language  TEXT NOT NULL,
                translated_tweet TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_{table}_screen_name ON {table}(screen_name);"
        );

        sqlx::raw_sql(&sql)
            .execute(pool)
            .await
            .map_err(|e| ParrotError::Memory(format!("migration for {table} failed: {e}")))?;

        Ok(())
    }

    /// Most recent records, newest first, optionally for one requester.
    pub async fn recent(
        &self,
        screen_name: Option<&str>,
        limit: i64,
    ) -> Result<Vec<InteractionRecord>, ParrotError> {
        let table = &self.table;
        let rows: Vec<(String, String, String, String, String)> = match screen_name {
            Some(name) => {
                sqlx::query_as(&format!(
                    "SELECT screen_name, tweet, date_tweeted, target_language, translated_tweet \
                     FROM {table} WHERE screen_name = ? \
                     ORDER BY date_tweeted DESC, rowid DESC LIMIT ?"
                ))
                .bind(name)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT screen_name, tweet, date_tweeted, target_language, translated_tweet \
                     FROM {table} ORDER BY date_tweeted DESC, rowid DESC LIMIT ?"
                ))
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| ParrotError::Memory(format!("failed to read {table}: {e}")))?;

        Ok(rows
            .into_iter()
            .map(
                |(screen_name, tweet, date_tweeted, target_language, translated_tweet)| {
                    InteractionRecord {
                        screen_name,
                        tweet,
                        date_tweeted,
                        target_language,
                        translated_tweet,
                    }
                },
            )
            .collect())
    }

    /// Total number of stored interactions.
    pub async fn count(&self) -> Result<i64, ParrotError> {
        let table = &self.table;
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ParrotError::Memory(format!("failed to count {table}: {e}")))?;
        Ok(count)
    }
}

#[async_trait]
impl InteractionStore for Store {
    async fn save(&self, record: &InteractionRecord) -> Result<(), ParrotError> {
        let table = &self.table;
        let id = Uuid::new_v4().to_string();

        sqlx::query(&format!(
            "INSERT INTO {table} \
             (id, screen_name, tweet, date_tweeted, target_language, translated_tweet) \
             VALUES (?, ?, ?, ?, ?, ?)"
        ))
        .bind(&id)
        .bind(&record.screen_name)
        .bind(&record.tweet)
        .bind(&record.date_tweeted)
        .bind(&record.target_language)
        .bind(&record.translated_tweet)
        .execute(&self.pool)
        .await
        .map_err(|e| ParrotError::Memory(format!("{table} write failed: {e}")))?;

        debug!(
            "store: {} [{}] {}",
            record.screen_name, record.target_language, record.date_tweeted
        );

        Ok(())
    }
}
