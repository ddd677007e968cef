//! Events, that own attendees and tasks

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{self, EventId, Record, Tabular};
use crate::schema::{Cell, Collection, Row};

/// An event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    /// `None` when the stored date is missing or cannot be parsed
    date: Option<NaiveDate>,
    time: String,
    location: String,
    description: String,
}

impl Event {
    pub fn new(id: EventId, draft: NewEvent) -> Self {
        Self {
            id,
            name: draft.name,
            date: Some(draft.date),
            time: draft.time,
            location: draft.location,
            description: draft.description,
        }
    }

    pub fn id(&self) -> EventId             { self.id              }
    pub fn name(&self) -> &str              { &self.name           }
    pub fn date(&self) -> Option<NaiveDate> { self.date            }
    pub fn time(&self) -> &str              { &self.time           }
    pub fn location(&self) -> &str          { &self.location       }
    pub fn description(&self) -> &str       { &self.description    }
}

impl Record for Event {
    const COLLECTION: Collection = Collection::Events;

    fn from_row(row: &Row) -> Self {
        Self {
            id: EventId::new(row.int("id")),
            name: row.text("name").to_string(),
            date: record::date_column(row, "date"),
            time: row.text("time").to_string(),
            location: row.text("location").to_string(),
            description: row.text("description").to_string(),
        }
    }

    fn to_row(&self) -> Row {
        Row::from_cells(Collection::Events, vec![
            Cell::Int(self.id.get()),
            Cell::from(self.name.as_str()),
            Cell::from(record::format_date(self.date)),
            Cell::from(self.time.as_str()),
            Cell::from(self.location.as_str()),
            Cell::from(self.description.as_str()),
        ])
    }
}

impl Tabular for Event {
    fn category(&self, column: &str) -> Option<String> {
        self.to_row().category(column)
    }
}


/// The data needed to create an [`Event`]. Its identifier is picked by the [`RecordStore`](crate::RecordStore)
#[derive(Clone, Debug, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub description: String,
}

impl NewEvent {
    pub fn new<S: ToString>(name: S, date: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            date,
            time: String::new(),
            location: String::new(),
            description: String::new(),
        }
    }

    pub fn at<S: ToString>(mut self, time: S) -> Self {
        self.time = time.to_string();
        self
    }

    pub fn in_location<S: ToString>(mut self, location: S) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn described_as<S: ToString>(mut self, description: S) -> Self {
        self.description = description.to_string();
        self
    }
}
