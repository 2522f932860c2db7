//! Task records and per-item normalization.
//!
//! Each board item carries a list of `{id, text}` column values. Every
//! column in [`COLUMN_IDS`] must be present on every item; a missing
//! column is a validation error naming the column and the item, not a
//! silent skip.

use chrono::{DateTime, NaiveDate};

use crate::board::Item;
use crate::error::{Result, SyncError};

pub const COL_PRIORITY: &str = "priority_1";
pub const COL_PEOPLE: &str = "people";
pub const COL_LABEL: &str = "label";
pub const COL_DATE: &str = "date";
pub const COL_PROJECT_STATUS: &str = "project_status";
pub const COL_EFFORT: &str = "numbers__1";
pub const COL_RELEVANT: &str = "status_1__1";

/// Column ids requested from the API for every item.
pub const COLUMN_IDS: [&str; 7] = [
    COL_PRIORITY,
    COL_PEOPLE,
    COL_LABEL,
    COL_DATE,
    COL_PROJECT_STATUS,
    COL_EFFORT,
    COL_RELEVANT,
];

/// A normalized board item, shaped for the `tasks` table.
///
/// Constructed transiently per page and discarded after persisting; the
/// remote id is the only identity it has.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub label: String,
    pub priority_text: String,
    pub people: String,
    pub date: Option<NaiveDate>,
    pub project_status: String,
    pub effort: Option<i64>,
    pub relevant: bool,
}

impl Task {
    /// Normalize one raw item. Required text columns pass through as-is
    /// (empty string is valid); `date` and `effort` treat empty text as
    /// absent; `relevant` is true iff its column text equals "yes"
    /// case-insensitively.
    pub fn from_item(item: &Item) -> Result<Self> {
        let id: i64 = item.id.parse().map_err(|_| {
            SyncError::MalformedResponse(format!("non-numeric item id {:?}", item.id))
        })?;

        let text = |col: &str| -> Result<String> {
            item.column_values
                .iter()
                .find(|cv| cv.id == col)
                .map(|cv| cv.text.clone().unwrap_or_default())
                .ok_or_else(|| {
                    SyncError::Validation(format!("item {id} is missing column {col:?}"))
                })
        };

        Ok(Self {
            id,
            name: item.name.clone(),
            label: text(COL_LABEL)?,
            priority_text: text(COL_PRIORITY)?,
            people: text(COL_PEOPLE)?,
            date: parse_date(&text(COL_DATE)?).map_err(|e| with_item(id, e))?,
            project_status: text(COL_PROJECT_STATUS)?,
            effort: parse_effort(&text(COL_EFFORT)?).map_err(|e| with_item(id, e))?,
            relevant: parse_relevant(&text(COL_RELEVANT)?),
        })
    }
}

/// Normalize a batch of items, preserving server order.
pub fn tasks_from_items(items: &[Item]) -> Result<Vec<Task>> {
    items.iter().map(Task::from_item).collect()
}

/// Prefix a validation message with the item it came from.
fn with_item(id: i64, err: SyncError) -> SyncError {
    match err {
        SyncError::Validation(msg) => SyncError::Validation(format!("item {id}: {msg}")),
        other => other,
    }
}

// ─── Field parsers ────────────────────────────────────────────────────────────

/// Date formats accepted besides RFC 3339. `%b` also matches full month
/// names when parsing, so "Jan 15, 2024" and "January 15, 2024" both hit
/// the second entry.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%b %d, %Y", "%d %b %Y", "%m/%d/%Y"];

pub fn parse_date(text: &str) -> Result<Option<NaiveDate>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(dt.date_naive()));
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(Some(date));
        }
    }
    Err(SyncError::Validation(format!("unparseable date {text:?}")))
}

pub fn parse_effort(text: &str) -> Result<Option<i64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| SyncError::Validation(format!("unparseable effort {text:?}")))
}

pub fn parse_relevant(text: &str) -> bool {
    text.eq_ignore_ascii_case("yes")
}
