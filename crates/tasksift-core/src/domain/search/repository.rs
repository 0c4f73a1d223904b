//! SQLite record store
//!
//! Runs the composer's attribute lookups against the task database.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{Error, Result};

use super::repository_trait::{ColumnLookup, RecordStore};

/// Record store backed by an SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn find_matching(&self, lookup: &ColumnLookup, value: &str) -> Result<Vec<i64>> {
        // SQLite's LIKE folds ASCII case only; wildcards in `value` are kept
        let sql = format!(
            "SELECT {result} FROM {table} WHERE {filter} LIKE '%' || ? || '%'",
            result = lookup.result_column(),
            table = lookup.table(),
            filter = lookup.filter_column(),
        );

        let ids: Vec<i64> = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        debug!(
            table = lookup.table(),
            column = lookup.filter_column(),
            rows = ids.len(),
            "Substring lookup"
        );
        Ok(ids)
    }

    async fn find_equal(&self, lookup: &ColumnLookup, value: &str) -> Result<Vec<i64>> {
        let sql = format!(
            "SELECT {result} FROM {table} WHERE {filter} = ?",
            result = lookup.result_column(),
            table = lookup.table(),
            filter = lookup.filter_column(),
        );

        let ids: Vec<i64> = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        debug!(
            table = lookup.table(),
            column = lookup.filter_column(),
            rows = ids.len(),
            "Equality lookup"
        );
        Ok(ids)
    }
}
