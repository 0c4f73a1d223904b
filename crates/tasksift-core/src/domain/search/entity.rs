//! Search entities
//!
//! Value types shared by the composer, the record store, and the host:
//! searchable attributes, the two query modes, the behavior options, and the
//! per-attribute composition report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::specification::Predicate;

/// Primary key of a task record
pub type TaskId = i64;

/// Marker that switches a query into ID-only mode
pub const ID_PREFIX: char = '#';

/// One searchable facet of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAttribute {
    /// Comment text, resolved to the owning task
    Comment,
    /// Task description
    Description,
    /// Task title
    Title,
    /// Subtask title, resolved to the owning task
    Subtask,
    /// Attachment file name, resolved to the owning task
    Attachment,
    /// Exact numeric task id (only for all-digit queries)
    Id,
    /// Project name, resolved to the project's tasks
    Project,
    /// Task metadata value
    MetadataValue,
}

impl SearchAttribute {
    /// All attributes in dispatch order
    pub const ALL: [SearchAttribute; 8] = [
        SearchAttribute::Comment,
        SearchAttribute::Description,
        SearchAttribute::Title,
        SearchAttribute::Subtask,
        SearchAttribute::Attachment,
        SearchAttribute::Id,
        SearchAttribute::Project,
        SearchAttribute::MetadataValue,
    ];

    /// Attribute name as understood by the host query pipeline
    pub fn name(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Description => "description",
            Self::Title => "title",
            Self::Subtask => "subtask",
            Self::Attachment => "attachment",
            Self::Id => "id",
            Self::Project => "project",
            Self::MetadataValue => "metadatavalue",
        }
    }

    /// Settings key holding this attribute's toggle
    pub fn toggle_key(&self) -> &'static str {
        match self {
            Self::Comment => "comment_search",
            Self::Description => "description_search",
            Self::Title => "title_search",
            Self::Subtask => "subtask_search",
            Self::Attachment => "attachment_search",
            Self::Id => "id_search",
            Self::Project => "project_search",
            Self::MetadataValue => "metadatavalue_search",
        }
    }
}

impl fmt::Display for SearchAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAttribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let attribute = match normalized.as_str() {
            "comment" => Self::Comment,
            "description" | "desc" => Self::Description,
            "title" => Self::Title,
            "subtask" => Self::Subtask,
            "attachment" => Self::Attachment,
            "id" | "taskid" => Self::Id,
            "project" => Self::Project,
            "metadatavalue" => Self::MetadataValue,
            _ => return Err(Error::UnknownAttribute(s.to_string())),
        };
        Ok(attribute)
    }
}

/// How a query value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "task_id", rename_all = "snake_case")]
pub enum SearchMode {
    /// `#<n>`: exact match on one task id, no attribute lookups
    IdOnly(TaskId),
    /// Substring search across the enabled attributes
    General,
}

impl SearchMode {
    /// Classify a query value, coercing a malformed `#` suffix to an integer
    ///
    /// The remainder after the marker is read like a loose numeric cast:
    /// leading whitespace and a sign are accepted, trailing garbage is
    /// ignored, and a remainder with no leading digits becomes `0`.
    pub fn classify(value: &str) -> Self {
        match id_prefix_remainder(value) {
            Some(rest) => Self::IdOnly(coerce_leading_integer(rest)),
            None => Self::General,
        }
    }

    /// Classify a query value, rejecting a `#` suffix that is not a plain
    /// decimal task id
    pub fn classify_strict(value: &str) -> Result<Self> {
        let Some(rest) = id_prefix_remainder(value) else {
            return Ok(Self::General);
        };

        if !is_all_digits(rest) {
            return Err(Error::InvalidInput(format!(
                "'{}' is not a task id; expected '#' followed by digits",
                value.trim_matches(QUERY_PADDING)
            )));
        }

        rest.parse::<TaskId>()
            .map(Self::IdOnly)
            .map_err(|e| Error::InvalidInput(format!("Task id '{}' out of range: {}", rest, e)))
    }
}

/// Characters stripped around a query before looking for the `#` marker
const QUERY_PADDING: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

fn id_prefix_remainder(value: &str) -> Option<&str> {
    value.trim_matches(QUERY_PADDING).strip_prefix(ID_PREFIX)
}

/// True when `value` is non-empty and made only of ASCII decimal digits
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Loose string-to-integer conversion.
///
/// Reads the longest numeric prefix (optional sign, digits, optional fraction
/// and exponent) and truncates toward zero. Out-of-range values saturate.
fn coerce_leading_integer(text: &str) -> TaskId {
    let s = text.trim_start_matches([' ', '\t', '\n', '\r', '\x0B', '\x0C']);
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    let mut float_end = end;
    if bytes.get(float_end) == Some(&b'.') {
        float_end += 1;
        while float_end < bytes.len() && bytes[float_end].is_ascii_digit() {
            float_end += 1;
        }
    }
    if matches!(bytes.get(float_end), Some(b'e' | b'E')) {
        let mut exp_end = float_end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            float_end = exp_end;
        }
    }

    if float_end > end {
        // `as` saturates and maps NaN to 0
        return s[..float_end].parse::<f64>().map(|f| f as TaskId).unwrap_or(0);
    }

    let negative = bytes[0] == b'-';
    s[..end]
        .parse::<TaskId>()
        .unwrap_or(if negative { TaskId::MIN } else { TaskId::MAX })
}

/// How the project lookup resolves candidate project ids to tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectMatch {
    /// Substring match of the id text against `tasks.project_id`.
    ///
    /// Project `1` also matches tasks of projects `10`, `21`, `100`, ...
    #[default]
    Substring,
    /// Exact equality on `tasks.project_id`
    Exact,
}

/// Which identifier the metadata-value lookup contributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataIdentity {
    /// The metadata row's own id, unlike every other attribute
    #[default]
    Row,
    /// The owning task id
    Task,
}

/// How a malformed `#` query is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPrefixPolicy {
    /// Coerce the remainder to an integer (`#abc` searches for task 0)
    #[default]
    Coerce,
    /// Reject anything but `#` followed by digits
    Strict,
}

macro_rules! option_enum_text {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($text),)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(Error::ConfigError(format!(
                        "Invalid value '{}'. Valid options: {}",
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }
    };
}

option_enum_text!(ProjectMatch { Substring => "substring", Exact => "exact" });
option_enum_text!(MetadataIdentity { Row => "row", Task => "task" });
option_enum_text!(IdPrefixPolicy { Coerce => "coerce", Strict => "strict" });

/// Behavior options for the composer
///
/// Defaults reproduce the established behavior of the task search, including
/// its known quirks; each field opts into a corrected variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub project_match: ProjectMatch,
    pub metadata_ids: MetadataIdentity,
    pub id_prefix: IdPrefixPolicy,
}

/// What one attribute contributed to a composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeContribution {
    pub attribute: SearchAttribute,
    pub enabled: bool,
    pub matched: usize,
}

/// Full outcome of composing a query value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub mode: SearchMode,
    /// Per-attribute report in dispatch order; empty in ID-only mode
    pub contributions: Vec<AttributeContribution>,
    pub predicate: Predicate,
}

impl Composition {
    /// Total identifiers gathered across attributes, duplicates included
    pub fn candidate_count(&self) -> usize {
        self.contributions.iter().map(|c| c.matched).sum()
    }
}
