//! Domain layer
//!
//! Contains the search composer and the task listing it feeds.

pub mod search;
pub mod specification;
pub mod tasks;
