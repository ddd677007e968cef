//! Typed records ([`Event`](crate::Event), [`Attendee`](crate::Attendee), [`Task`](crate::Task)) and what they have in common

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::{Collection, RawRow, Row};

/// A record that lives in one of the [`Collection`]s
pub trait Record: Sized {
    const COLLECTION: Collection;

    /// Build a typed record out of a normalized row.
    /// This never fails: values that cannot be typed are coerced (and logged)
    fn from_row(row: &Row) -> Self;

    fn to_row(&self) -> Row;
}

/// Anything that can return the value of a categorical column, e.g. to compute a [`Distribution`](crate::analytics::Distribution)
pub trait Tabular {
    /// Returns `None` if this item has no such column
    fn category(&self, column: &str) -> Option<String>;
}

impl Tabular for Row {
    fn category(&self, column: &str) -> Option<String> {
        self.get(column).map(|cell| cell.to_string())
    }
}

impl Tabular for RawRow {
    fn category(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            serde_json::Value::Null => Some(String::new()),
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl<T: Tabular> Tabular for &T {
    fn category(&self, column: &str) -> Option<String> {
        (*self).category(column)
    }
}


/// The identifier of an [`Event`](crate::Event)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(i64);

impl EventId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self { Self(id) }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}


const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d"];

/// Parse a calendar date the way spreadsheets and CSV exports tend to write them
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS.iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            // ISO datetimes, e.g. "2025-05-25T00:00:00"
            text.get(..10).and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

/// Like [`parse_date`], but logs values that are present yet unparsable
pub(crate) fn date_column(row: &Row, column: &str) -> Option<NaiveDate> {
    let text = row.text(column);
    let date = parse_date(text);
    if date.is_none() && text.trim().is_empty() == false {
        log::warn!("Invalid date {:?} in {}.{}. Ignoring it", text, row.collection(), column);
    }
    date
}

pub(crate) fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Returns `None` for empty (or blank) optional columns
pub(crate) fn optional_column(row: &Row, column: &str) -> Option<String> {
    let text = row.text(column);
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parse an enumerated column, falling back to `default` (and logging) for unknown values
pub(crate) fn enum_column<T>(row: &Row, column: &str, default: T) -> T
where
    T: FromStr,
{
    let text = row.text(column);
    match text.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            if text.trim().is_empty() == false {
                log::warn!("Unknown {}.{} value {:?}. Using the default value instead", row.collection(), column, text);
            }
            default
        }
    }
}

/// Normalizes a label before comparing it to canonical labels ("in progress", "In-Progress" and "IN_PROGRESS" are the same)
pub(crate) fn label_key(label: &str) -> String {
    label.trim()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
