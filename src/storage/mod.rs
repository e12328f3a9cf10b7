//! SQLite-backed record store
//!
//! One [`Store`] owns the connection pool and is shared by every handler.
//! Each collection lives in its own submodule as an `impl Store` block.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::Result;

mod motion;
mod pills;
mod pot;
mod recipes;
mod schema;

/// Options for opening an on-disk store
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub path: PathBuf,
    pub max_connections: u32,
}

/// Handle to the embedded database
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    location: String,
}

impl Store {
    /// Open (creating if missing) the database file and ensure the schema exists.
    pub async fn open(options: &StoreOptions) -> Result<Self> {
        let path = options.path.as_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let connect = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect)
            .await?;

        Self::from_pool(pool, path.display().to_string()).await
    }

    /// Convenience wrapper around [`Store::open`] with default pool size.
    pub async fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(&StoreOptions {
            path: path.as_ref().to_path_buf(),
            max_connections: 5,
        })
        .await
    }

    /// Private in-memory database.
    ///
    /// Pinned to a single connection that is never recycled; every
    /// connection to `:memory:` would otherwise see its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let connect = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(connect)
            .await?;

        Self::from_pool(pool, ":memory:".to_string()).await
    }

    async fn from_pool(pool: SqlitePool, location: String) -> Result<Self> {
        let store = Self { pool, location };
        store.migrate().await?;

        tracing::info!(location = %store.location, "Record store ready");
        Ok(store)
    }

    /// Where the database lives (file path or `:memory:`)
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Round-trip a trivial query to prove the database is reachable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
