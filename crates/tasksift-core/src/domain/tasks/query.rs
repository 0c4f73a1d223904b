//! Task listing query

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::domain::search::{Predicate, SqlBind, TaskId};
use crate::domain::specification::Specification;
use crate::error::{Error, Result};

/// Column every predicate constrains
const TASK_ID_COLUMN: &str = "tasks.id";

const SELECT_TASKS: &str = r#"
    SELECT tasks.id AS id, tasks.title AS title, tasks.project_id AS project_id,
           projects.name AS project_name
    FROM tasks
    LEFT JOIN projects ON projects.id = tasks.project_id
"#;

/// One row of a task listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TaskSummary {
    pub id: TaskId,
    pub title: String,
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
}

/// In-progress task listing; all attached predicates must hold
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    predicates: Vec<Predicate>,
}

impl TaskListQuery {
    /// Create an unfiltered query
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a predicate
    pub fn filter(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    /// Attached predicates in order
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Render the full statement and its bind values
    pub fn to_sql(&self) -> (String, Vec<SqlBind>) {
        let mut sql = SELECT_TASKS.trim_end().to_string();
        let mut binds = Vec::new();

        let clauses: Vec<String> = self
            .predicates
            .iter()
            .map(|predicate| {
                let (clause, bind) = predicate.to_sql(TASK_ID_COLUMN);
                binds.push(bind);
                clause
            })
            .collect();

        if !clauses.is_empty() {
            sql.push_str("\n    WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str("\n    ORDER BY tasks.id");

        (sql, binds)
    }

    /// Fetch the matching tasks
    pub async fn fetch(&self, pool: &SqlitePool) -> Result<Vec<TaskSummary>> {
        let (sql, binds) = self.to_sql();

        let mut query = sqlx::query_as::<_, TaskSummary>(&sql);
        for bind in &binds {
            query = match bind {
                SqlBind::Id(id) => query.bind(*id),
                SqlBind::IdArray(ids) => query.bind(ids.as_str()),
            };
        }

        let tasks = query.fetch_all(pool).await.map_err(Error::DatabaseError)?;
        debug!(
            predicates = self.predicates.len(),
            binds = binds.len(),
            rows = tasks.len(),
            "Fetched task listing"
        );
        Ok(tasks)
    }
}

impl Specification<TaskId> for TaskListQuery {
    fn is_satisfied_by(&self, task_id: &TaskId) -> bool {
        self.predicates.iter().all(|p| p.is_satisfied_by(task_id))
    }
}
