//! Tasksift Core Library
//!
//! This crate provides the core functionality for Tasksift, including:
//! - Search predicate composition across task attributes
//! - Task listing queries the composed predicate is attached to
//! - Storage (SQLite schema, migrations, settings table)
//! - File-backed configuration

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::search::{
        Predicate, RecordStore, SearchAttribute, SearchComposer, SearchOptions,
        SqliteRecordStore, ToggleSource,
    };
    pub use crate::domain::tasks::{TaskListQuery, TaskSummary};
    pub use crate::error::{Error, Result};
    pub use crate::storage::{Database, SettingsRepository};
}
