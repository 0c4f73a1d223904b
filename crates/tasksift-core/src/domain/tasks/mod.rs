//! Task listing
//!
//! The host's task listing query. Filter stages such as the search composer
//! attach predicates to a [`TaskListQuery`], which then fetches matching
//! tasks.

pub mod query;

pub use query::{TaskListQuery, TaskSummary};
