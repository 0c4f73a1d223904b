//! Settings table
//!
//! Option/value rows shared with the host application. The search attribute
//! toggles are stored here under their `*_search` keys.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::domain::search::{SearchAttribute, ToggleSource, setting_enabled};
use crate::error::{Error, Result};

/// Value written when enabling a toggle
const ENABLED: &str = "1";
/// Value written when disabling a toggle
const DISABLED: &str = "0";

/// Repository for the settings table
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a setting value
    pub async fn get(&self, option: &str) -> Result<Option<String>> {
        sqlx::query_scalar("SELECT value FROM settings WHERE option = ?")
            .bind(option)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::DatabaseError)
    }

    /// Insert or replace a setting value
    pub async fn set(&self, option: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (option, value) VALUES (?, ?)
            ON CONFLICT(option) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(option)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(Error::DatabaseError)?;

        debug!(option, value, "Setting saved");
        Ok(())
    }

    /// Remove a setting; returns whether it existed
    pub async fn remove(&self, option: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE option = ?")
            .bind(option)
            .execute(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;
        Ok(result.rows_affected() > 0)
    }

    /// All settings ordered by option name
    pub async fn list(&self) -> Result<Vec<(String, String)>> {
        sqlx::query_as("SELECT option, value FROM settings ORDER BY option")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::DatabaseError)
    }

    /// Enable searching on an attribute
    pub async fn enable(&self, attribute: SearchAttribute) -> Result<()> {
        self.set(attribute.toggle_key(), ENABLED).await
    }

    /// Disable searching on an attribute
    pub async fn disable(&self, attribute: SearchAttribute) -> Result<()> {
        self.set(attribute.toggle_key(), DISABLED).await
    }

    /// Every attribute with its current toggle state, in dispatch order
    pub async fn toggle_states(&self) -> Result<Vec<(SearchAttribute, bool)>> {
        let mut states = Vec::with_capacity(SearchAttribute::ALL.len());
        for attribute in SearchAttribute::ALL {
            states.push((attribute, self.is_enabled(attribute.toggle_key()).await?));
        }
        Ok(states)
    }
}

#[async_trait]
impl ToggleSource for SettingsRepository {
    async fn is_enabled(&self, key: &str) -> Result<bool> {
        Ok(self
            .get(key)
            .await?
            .map(|value| setting_enabled(&value))
            .unwrap_or(false))
    }
}
