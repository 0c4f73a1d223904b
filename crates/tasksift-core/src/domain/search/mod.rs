//! Search domain module
//!
//! Composes a single inclusion predicate for the task listing from one
//! free-text query value.
//!
//! # Architecture
//!
//! - **Entities**: `SearchAttribute`, `SearchMode`, `SearchOptions`, `Composition`
//! - **Repository**: `RecordStore` for read-only lookups, `SqliteRecordStore` over SQLite
//! - **Toggles**: `ToggleSource` deciding which attributes participate
//! - **Service**: `SearchComposer` running the enabled lookups and building the `Predicate`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tasksift_core::domain::search::{SearchComposer, SqliteRecordStore};
//! use tasksift_core::domain::tasks::TaskListQuery;
//! use tasksift_core::storage::SettingsRepository;
//!
//! let composer = SearchComposer::new(
//!     Arc::new(SqliteRecordStore::new(pool.clone())),
//!     Arc::new(SettingsRepository::new(pool.clone())),
//! );
//!
//! let mut query = TaskListQuery::new();
//! composer.apply(&mut query, "quarterly report").await?;
//! let tasks = query.fetch(&pool).await?;
//! ```

pub mod entity;
pub mod repository;
pub mod repository_trait;
pub mod service;
pub mod specification;
pub mod toggle;

// Re-export main types
pub use entity::{
    AttributeContribution, Composition, ID_PREFIX, IdPrefixPolicy, MetadataIdentity,
    ProjectMatch, SearchAttribute, SearchMode, SearchOptions, TaskId,
};
pub use repository::SqliteRecordStore;
pub use repository_trait::{ColumnLookup, RecordStore, lookups};
pub use service::SearchComposer;
pub use specification::{NO_MATCH_SENTINEL, Predicate, SqlBind};
pub use toggle::{StaticToggles, ToggleSource, setting_enabled};
