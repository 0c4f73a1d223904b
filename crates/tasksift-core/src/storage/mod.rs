//! Storage layer - SQLite
//!
//! Provides database management, migrations, and the settings table.
//!
//! # Architecture
//!
//! - `database`: Connection pool management and initialization
//! - `migrations`: Schema versioning and automatic migration
//! - `settings`: Option/value settings, including the search toggles
//!
//! # Usage
//!
//! ```ignore
//! use tasksift_core::storage::{Database, SettingsRepository};
//!
//! // Create an in-memory database for testing
//! let db = Database::in_memory().await?;
//!
//! let settings = SettingsRepository::new(db.pool().clone());
//! settings.enable(SearchAttribute::Title).await?;
//! ```

pub mod database;
pub mod migrations;
pub mod settings;

// Re-export commonly used types
pub use database::{DEFAULT_MAX_CONNECTIONS, Database, DatabaseConfig, default_database_path};
pub use migrations::{CURRENT_VERSION, MigrationStatus, migration_status, run_migrations};
pub use settings::SettingsRepository;
