//! Database layer for Reviewer Rota
//!
//! Provides SQLite persistence for teams, users and pull requests, and
//! implements the `rota-core` store traits on top of it.

pub mod error;
pub mod repos;
pub mod store;

use std::path::Path;
use std::str::FromStr;

use rota_core::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;

pub use error::{Error, Result};
pub use repos::{PullRequestsRepo, TeamsRepo, UsersRepo};
pub use store::SqliteStore;

/// Database connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect with the given configuration and run pending migrations
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        // Create parent directory if needed
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", config.path.display()))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!(path = %config.path.display(), "Database ready");
        Ok(Self { pool })
    }

    /// Connect to the database file at `path` with default settings
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let config = DatabaseConfig {
            path: path.as_ref().to_path_buf(),
            ..DatabaseConfig::default()
        };
        Self::connect(&config).await
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn users(&self) -> UsersRepo {
        UsersRepo::new(self.pool.clone())
    }

    pub fn teams(&self) -> TeamsRepo {
        TeamsRepo::new(self.pool.clone())
    }

    pub fn pull_requests(&self) -> PullRequestsRepo {
        PullRequestsRepo::new(self.pool.clone())
    }

    /// Close the database connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use super::Database;

    /// Fresh migrated database in a temporary directory
    ///
    /// Keep the returned `TempDir` alive for as long as the database is used.
    pub async fn temp_database() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("rota.db")).await.unwrap();
        (dir, db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_creation() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let db = Database::open(&db_path).await.unwrap();
        assert!(db_path.exists());
        db.close().await;
    }

    #[tokio::test]
    async fn test_database_migrations() {
        let (_dir, db) = test_support::temp_database().await;

        for table in ["teams", "users", "pull_requests", "pull_request_reviewers"] {
            let result: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            )
            .bind(table)
            .fetch_one(db.pool())
            .await
            .unwrap();
            assert_eq!(result.0, 1, "missing table {table}");
        }
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).await.unwrap();
        db.teams()
            .save(&rota_core::Team::new("backend"))
            .await
            .unwrap();
        db.close().await;

        let db = Database::open(&db_path).await.unwrap();
        assert!(db.teams().find_by_name("backend").await.unwrap().is_some());
    }
}
