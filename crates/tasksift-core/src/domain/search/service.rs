//! Search predicate composer
//!
//! Turns one free-text query value into a single predicate on the task id
//! column. A `#<n>` value short-circuits into an exact id match; anything
//! else runs the lookup of every enabled attribute and unions the results.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::tasks::TaskListQuery;
use crate::error::Result;

use super::entity::{
    AttributeContribution, Composition, IdPrefixPolicy, MetadataIdentity, ProjectMatch,
    SearchAttribute, SearchMode, SearchOptions, TaskId, is_all_digits,
};
use super::repository_trait::{ColumnLookup, RecordStore, lookups};
use super::specification::Predicate;
use super::toggle::ToggleSource;

/// How an attribute turns the query value into task ids
#[derive(Debug, Clone, Copy)]
enum Lookup {
    /// Substring match on one column
    Substring(ColumnLookup),
    /// Equality match, only when the raw value is all digits
    DigitsEqual(ColumnLookup),
    /// Matching projects by name, then their tasks by project reference
    ProjectTasks,
    /// Substring match on metadata values, returning row or task ids
    MetadataValue,
}

/// One row of the dispatch table
#[derive(Debug, Clone, Copy)]
struct AttributeEntry {
    attribute: SearchAttribute,
    lookup: Lookup,
}

/// Attributes in evaluation order
const ATTRIBUTE_TABLE: [AttributeEntry; 8] = [
    AttributeEntry {
        attribute: SearchAttribute::Comment,
        lookup: Lookup::Substring(lookups::COMMENT_TEXT),
    },
    AttributeEntry {
        attribute: SearchAttribute::Description,
        lookup: Lookup::Substring(lookups::TASK_DESCRIPTION),
    },
    AttributeEntry {
        attribute: SearchAttribute::Title,
        lookup: Lookup::Substring(lookups::TASK_TITLE),
    },
    AttributeEntry {
        attribute: SearchAttribute::Subtask,
        lookup: Lookup::Substring(lookups::SUBTASK_TITLE),
    },
    AttributeEntry {
        attribute: SearchAttribute::Attachment,
        lookup: Lookup::Substring(lookups::ATTACHMENT_NAME),
    },
    AttributeEntry {
        attribute: SearchAttribute::Id,
        lookup: Lookup::DigitsEqual(lookups::TASK_ID),
    },
    AttributeEntry {
        attribute: SearchAttribute::Project,
        lookup: Lookup::ProjectTasks,
    },
    AttributeEntry {
        attribute: SearchAttribute::MetadataValue,
        lookup: Lookup::MetadataValue,
    },
];

/// Composes the task search predicate for a query value
///
/// Collaborators are read-only for the duration of a call; lookups run one
/// after another in table order and any failure aborts the composition.
#[derive(Clone)]
pub struct SearchComposer {
    store: Arc<dyn RecordStore>,
    toggles: Arc<dyn ToggleSource>,
    options: SearchOptions,
}

impl std::fmt::Debug for SearchComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchComposer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl SearchComposer {
    /// Create a composer with default options
    pub fn new(store: Arc<dyn RecordStore>, toggles: Arc<dyn ToggleSource>) -> Self {
        Self {
            store,
            toggles,
            options: SearchOptions::default(),
        }
    }

    /// Replace the behavior options
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Attribute names this composer understands, in evaluation order
    pub fn attributes() -> Vec<&'static str> {
        ATTRIBUTE_TABLE
            .iter()
            .map(|entry| entry.attribute.name())
            .collect()
    }

    /// Classify a query value under the configured `#` policy
    pub fn classify(&self, value: &str) -> Result<SearchMode> {
        match self.options.id_prefix {
            IdPrefixPolicy::Coerce => Ok(SearchMode::classify(value)),
            IdPrefixPolicy::Strict => SearchMode::classify_strict(value),
        }
    }

    /// Compose the predicate for `value`
    pub async fn compose(&self, value: &str) -> Result<Predicate> {
        Ok(self.compose_detailed(value).await?.predicate)
    }

    /// Compose the predicate for `value` along with a per-attribute report
    pub async fn compose_detailed(&self, value: &str) -> Result<Composition> {
        let mode = self.classify(value)?;

        if let SearchMode::IdOnly(task_id) = mode {
            debug!(task_id, "ID-only search, skipping attribute lookups");
            return Ok(Composition {
                mode,
                contributions: Vec::new(),
                predicate: Predicate::IdEquals(task_id),
            });
        }

        let mut candidates: Vec<TaskId> = Vec::new();
        let mut contributions = Vec::with_capacity(ATTRIBUTE_TABLE.len());

        for entry in &ATTRIBUTE_TABLE {
            let enabled = self
                .toggles
                .is_enabled(entry.attribute.toggle_key())
                .await?;

            let matched = if enabled {
                let ids = self.run_lookup(entry.lookup, value).await?;
                let count = ids.len();
                candidates.extend(ids);
                count
            } else {
                0
            };

            debug!(
                attribute = entry.attribute.name(),
                enabled, matched, "Attribute lookup"
            );
            contributions.push(AttributeContribution {
                attribute: entry.attribute,
                enabled,
                matched,
            });
        }

        let predicate = Predicate::member_of(candidates);
        info!(
            candidates = contributions.iter().map(|c| c.matched).sum::<usize>(),
            no_match = predicate.is_no_match(),
            "Composed search predicate"
        );

        Ok(Composition {
            mode,
            contributions,
            predicate,
        })
    }

    /// Compose the predicate for `value` and attach it to `query`
    pub async fn apply(&self, query: &mut TaskListQuery, value: &str) -> Result<()> {
        let predicate = self.compose(value).await?;
        query.filter(predicate);
        Ok(())
    }

    async fn run_lookup(&self, lookup: Lookup, value: &str) -> Result<Vec<TaskId>> {
        match lookup {
            Lookup::Substring(column) => self.store.find_matching(&column, value).await,
            Lookup::DigitsEqual(column) => {
                if is_all_digits(value) {
                    self.store.find_equal(&column, value).await
                } else {
                    Ok(Vec::new())
                }
            }
            Lookup::ProjectTasks => self.project_task_ids(value).await,
            Lookup::MetadataValue => {
                let column = match self.options.metadata_ids {
                    MetadataIdentity::Row => lookups::METADATA_VALUE_ROW,
                    MetadataIdentity::Task => lookups::METADATA_VALUE_TASK,
                };
                self.store.find_matching(&column, value).await
            }
        }
    }

    async fn project_task_ids(&self, value: &str) -> Result<Vec<TaskId>> {
        let project_ids = self
            .store
            .find_matching(&lookups::PROJECT_NAME, value)
            .await?;

        let mut task_ids = Vec::new();
        for project_id in project_ids {
            let project_ref = project_id.to_string();
            let ids = match self.options.project_match {
                ProjectMatch::Substring => {
                    self.store
                        .find_matching(&lookups::TASK_PROJECT, &project_ref)
                        .await?
                }
                ProjectMatch::Exact => {
                    self.store
                        .find_equal(&lookups::TASK_PROJECT, &project_ref)
                        .await?
                }
            };
            task_ids.extend(ids);
        }
        Ok(task_ids)
    }
}
