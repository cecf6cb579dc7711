//! A to-do record that can live in a [`FileCache`](filecache_core::FileCache).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use filecache_core::{json_via_serde, CsvConvertible, Identifiable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Column names in CSV order.
const CSV_COLUMNS: [&str; 7] = [
    "id",
    "text",
    "importance",
    "deadline",
    "done",
    "created_at",
    "modified_at",
];

/// How urgent an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
}

impl Importance {
    pub fn is_normal(&self) -> bool {
        *self == Self::Normal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            other => Err(format!("unknown importance: {other}")),
        }
    }
}

/// A single to-do entry.
///
/// Timestamps are stored with whole-second precision, which is what both
/// file formats carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    /// Omitted from JSON when `normal`.
    #[serde(default, skip_serializing_if = "Importance::is_normal")]
    pub importance: Importance,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub done: bool,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// A new, unfinished item with a random id, created now.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            importance: Importance::Normal,
            deadline: None,
            done: false,
            created_at: Utc::now().trunc_subsecs(0),
            modified_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline.trunc_subsecs(0));
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at.trunc_subsecs(0);
        self
    }

    /// Set the done flag and stamp the modification time.
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
        self.modified_at = Some(Utc::now().trunc_subsecs(0));
    }
}

impl Identifiable for TodoItem {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

json_via_serde!(TodoItem);

impl CsvConvertible for TodoItem {
    fn parse_csv(row: &str, separator: &str) -> Option<Self> {
        let fields: Vec<&str> = row.split(separator).collect();
        let [id, text, importance, deadline, done, created_at, modified_at] = fields.as_slice()
        else {
            return None;
        };
        if id.is_empty() {
            return None;
        }

        Some(Self {
            id: id.to_string(),
            text: text.to_string(),
            importance: importance.parse().ok()?,
            deadline: parse_optional_timestamp(deadline)?,
            done: done.parse().ok()?,
            created_at: parse_timestamp(created_at)?,
            modified_at: parse_optional_timestamp(modified_at)?,
        })
    }

    fn csv_header(separator: &str) -> String {
        CSV_COLUMNS.join(separator)
    }

    fn to_csv_row(&self, separator: &str) -> String {
        [
            self.id.clone(),
            self.text.clone(),
            self.importance.to_string(),
            format_optional_timestamp(self.deadline),
            self.done.to_string(),
            self.created_at.timestamp().to_string(),
            format_optional_timestamp(self.modified_at),
        ]
        .join(separator)
    }
}

fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(field.parse().ok()?, 0)
}

/// `Some(None)` for an empty field, `None` for an unparseable one.
fn parse_optional_timestamp(field: &str) -> Option<Option<DateTime<Utc>>> {
    if field.is_empty() {
        return Some(None);
    }
    parse_timestamp(field).map(Some)
}

fn format_optional_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.timestamp().to_string()).unwrap_or_default()
}
