//! Attendees of an event

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{self, EventId, Record, Tabular};
use crate::schema::{Cell, Collection, Row};

/// The answer of an attendee to an invitation.
///
/// Any answer can be changed into any other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rsvp {
    Pending,
    Confirmed,
    Declined,
}

impl Rsvp {
    pub fn label(&self) -> &'static str {
        match self {
            Rsvp::Pending => "Pending",
            Rsvp::Confirmed => "Confirmed",
            Rsvp::Declined => "Declined",
        }
    }

    pub fn all() -> [Rsvp; 3] {
        [Rsvp::Pending, Rsvp::Confirmed, Rsvp::Declined]
    }
}

impl Default for Rsvp {
    fn default() -> Self {
        Rsvp::Pending
    }
}

impl Display for Rsvp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Rsvp {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = record::label_key(s);
        Rsvp::all().iter()
            .copied()
            .find(|rsvp| record::label_key(rsvp.label()) == key)
            .ok_or_else(|| format!("Invalid RSVP {:?}", s))
    }
}


/// Someone invited to an event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    event_id: EventId,
    name: String,
    email: String,
    rsvp: Rsvp,
    role: Option<String>,
    dietary: Option<String>,
}

impl Attendee {
    pub fn new(draft: NewAttendee) -> Self {
        Self {
            event_id: draft.event_id,
            name: draft.name,
            email: draft.email,
            rsvp: draft.rsvp,
            role: draft.role,
            dietary: draft.dietary,
        }
    }

    pub fn event_id(&self) -> EventId      { self.event_id            }
    pub fn name(&self) -> &str             { &self.name               }
    pub fn email(&self) -> &str            { &self.email              }
    pub fn rsvp(&self) -> Rsvp             { self.rsvp                }
    pub fn role(&self) -> Option<&str>     { self.role.as_deref()     }
    pub fn dietary(&self) -> Option<&str>  { self.dietary.as_deref()  }
}

impl Record for Attendee {
    const COLLECTION: Collection = Collection::Attendees;

    fn from_row(row: &Row) -> Self {
        Self {
            event_id: EventId::new(row.int("event_id")),
            name: row.text("name").to_string(),
            email: row.text("email").to_string(),
            rsvp: record::enum_column(row, "rsvp", Rsvp::default()),
            role: record::optional_column(row, "role"),
            dietary: record::optional_column(row, "dietary"),
        }
    }

    fn to_row(&self) -> Row {
        Row::from_cells(Collection::Attendees, vec![
            Cell::Int(self.event_id.get()),
            Cell::from(self.name.as_str()),
            Cell::from(self.email.as_str()),
            Cell::from(self.rsvp.label()),
            Cell::from(self.role.clone()),
            Cell::from(self.dietary.clone()),
        ])
    }
}

impl Tabular for Attendee {
    fn category(&self, column: &str) -> Option<String> {
        self.to_row().category(column)
    }
}


/// The data needed to add an [`Attendee`] to an existing event
#[derive(Clone, Debug, PartialEq)]
pub struct NewAttendee {
    pub event_id: EventId,
    pub name: String,
    pub email: String,
    pub rsvp: Rsvp,
    pub role: Option<String>,
    pub dietary: Option<String>,
}

impl NewAttendee {
    pub fn new<S: ToString, T: ToString>(event_id: EventId, name: S, email: T, rsvp: Rsvp) -> Self {
        Self {
            event_id,
            name: name.to_string(),
            email: email.to_string(),
            rsvp,
            role: None,
            dietary: None,
        }
    }

    /// Set the role, unless it is blank
    pub fn with_role<S: ToString>(mut self, role: S) -> Self {
        self.role = non_blank(role.to_string());
        self
    }

    /// Set the dietary preferences, unless they are blank
    pub fn with_dietary<S: ToString>(mut self, dietary: S) -> Self {
        self.dietary = non_blank(dietary.to_string());
        self
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}
