//! Search predicates
//!
//! The composer's output: a constraint on the task id column that the host
//! attaches to its task listing query.

use serde::Serialize;

use crate::domain::specification::Specification;

use super::entity::TaskId;

/// Id that no task can have; used so an empty search matches nothing
pub const NO_MATCH_SENTINEL: TaskId = -1;

/// Constraint on the task id column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Predicate {
    /// `id = <n>`
    IdEquals(TaskId),
    /// `id IN (...)`; repeated ids are allowed and harmless
    IdIn(Vec<TaskId>),
}

impl Predicate {
    /// Build an inclusion predicate, falling back to the sentinel when `ids`
    /// is empty so the result never leaves the query unconstrained
    pub fn member_of(ids: Vec<TaskId>) -> Self {
        if ids.is_empty() {
            Self::IdIn(vec![NO_MATCH_SENTINEL])
        } else {
            Self::IdIn(ids)
        }
    }

    /// True when this predicate can only match the sentinel
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::IdIn(ids) if ids.iter().all(|id| *id == NO_MATCH_SENTINEL))
    }

    /// Render as a parameterised SQL fragment over `column`
    ///
    /// Every predicate binds exactly one value. An id list travels as a single
    /// JSON array expanded by `json_each`, so its length is not limited by the
    /// number of SQL variables.
    pub fn to_sql(&self, column: &str) -> (String, SqlBind) {
        match self {
            Self::IdEquals(id) => (format!("{} = ?", column), SqlBind::Id(*id)),
            Self::IdIn(ids) => (
                format!("{} IN (SELECT value FROM json_each(?))", column),
                SqlBind::IdArray(serde_json::Value::from(ids.clone()).to_string()),
            ),
        }
    }
}

/// Value bound to the placeholder of a rendered predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlBind {
    /// One task id
    Id(TaskId),
    /// Task ids encoded as a JSON array
    IdArray(String),
}

impl Specification<TaskId> for Predicate {
    fn is_satisfied_by(&self, task_id: &TaskId) -> bool {
        match self {
            Self::IdEquals(id) => id == task_id,
            Self::IdIn(ids) => ids.contains(task_id),
        }
    }
}
