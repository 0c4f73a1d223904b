//! Repository trait for search lookups
//!
//! This module defines the read-only capability the composer runs its
//! attribute lookups through. The trait abstracts over storage backends
//! (SQLite, in-memory fakes, etc.).

use async_trait::async_trait;

use crate::error::Result;

/// A filter column and a result column on one table
///
/// Only the constants in [`lookups`] exist; table and column names never come
/// from callers, so implementations may splice them into SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnLookup {
    table: &'static str,
    filter_column: &'static str,
    result_column: &'static str,
}

impl ColumnLookup {
    const fn new(
        table: &'static str,
        filter_column: &'static str,
        result_column: &'static str,
    ) -> Self {
        Self {
            table,
            filter_column,
            result_column,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn filter_column(&self) -> &'static str {
        self.filter_column
    }

    pub fn result_column(&self) -> &'static str {
        self.result_column
    }
}

/// The lookups the search attributes are built from
pub mod lookups {
    use super::ColumnLookup;

    pub const COMMENT_TEXT: ColumnLookup = ColumnLookup::new("comments", "comment", "task_id");
    pub const TASK_DESCRIPTION: ColumnLookup = ColumnLookup::new("tasks", "description", "id");
    pub const TASK_TITLE: ColumnLookup = ColumnLookup::new("tasks", "title", "id");
    pub const SUBTASK_TITLE: ColumnLookup = ColumnLookup::new("subtasks", "title", "task_id");
    pub const ATTACHMENT_NAME: ColumnLookup =
        ColumnLookup::new("task_has_files", "name", "task_id");
    pub const TASK_ID: ColumnLookup = ColumnLookup::new("tasks", "id", "id");
    pub const PROJECT_NAME: ColumnLookup = ColumnLookup::new("projects", "name", "id");
    pub const TASK_PROJECT: ColumnLookup = ColumnLookup::new("tasks", "project_id", "id");
    pub const METADATA_VALUE_ROW: ColumnLookup =
        ColumnLookup::new("task_has_metadata", "value", "id");
    pub const METADATA_VALUE_TASK: ColumnLookup =
        ColumnLookup::new("task_has_metadata", "value", "task_id");
}

/// Read-only record lookups
///
/// Returning no rows is not an error; only I/O or query failures are.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Values of the result column for rows whose filter column contains
    /// `value`, ignoring case. `%` and `_` in `value` act as wildcards.
    async fn find_matching(&self, lookup: &ColumnLookup, value: &str) -> Result<Vec<i64>>;

    /// Values of the result column for rows whose filter column equals `value`
    async fn find_equal(&self, lookup: &ColumnLookup, value: &str) -> Result<Vec<i64>>;
}
