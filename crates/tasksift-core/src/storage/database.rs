//! SQLite connection pool
//!
//! Opens the task database and brings its schema up to date.

use crate::storage::migrations::{self, MigrationStatus};
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Pool size used when the config does not set one
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where the database lives and how many connections to keep
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database file; `None` opens a private in-memory database
    pub path: Option<PathBuf>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// File-backed database at `path`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Private in-memory database
    fn in_memory() -> Self {
        // A second connection would see a different, empty database
        Self {
            path: None,
            max_connections: 1,
        }
    }

    /// Set the pool size
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// `<config dir>/tasksift/tasksift.db`, or `tasksift.db` when there is no
/// config dir
pub fn default_database_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("tasksift").join("tasksift.db"),
        None => PathBuf::from("tasksift.db"),
    }
}

/// Migrated task database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (creating if needed) and migrate the database
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let options = match &config.path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory: {}", parent.display())
                    })?;
                }
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
            }
            None => SqliteConnectOptions::from_str("sqlite::memory:")?,
        }
        .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .with_context(|| match &config.path {
                Some(path) => format!("Failed to open database: {}", path.display()),
                None => "Failed to open in-memory database".to_string(),
            })?;

        migrations::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            pool,
            path: config.path,
        })
    }

    /// Open a fresh in-memory database
    pub async fn in_memory() -> Result<Self> {
        Self::new(DatabaseConfig::in_memory()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Database file, `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn migration_status(&self) -> Result<MigrationStatus> {
        migrations::migration_status(&self.pool)
            .await
            .context("Failed to check migration status")
    }

    /// Run a trivial query against the pool
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    /// Close every pooled connection; later queries fail
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
