//! Collections, their fixed column sets, and the normalization applied to raw rows
//!
//! Backends exchange [`RawRow`]s, i.e. loosely-typed JSON objects that may miss columns or carry values of the wrong type.
//! Everything the store does goes through [`Schema::normalize`] first, so that a [`Row`] always has every canonical column, in canonical order.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row, as exchanged with a [`Backend`](crate::traits::Backend)
pub type RawRow = serde_json::Map<String, Value>;

/// The three record sets managed by this crate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    Events,
    Attendees,
    Tasks,
}

impl Collection {
    /// The name used by backends (file names, sheet names...)
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Attendees => "attendees",
            Collection::Tasks => "tasks",
        }
    }

    pub fn schema(&self) -> &'static Schema {
        match self {
            Collection::Events => &EVENTS_SCHEMA,
            Collection::Attendees => &ATTENDEES_SCHEMA,
            Collection::Tasks => &TASKS_SCHEMA,
        }
    }

    pub fn all() -> [Collection; 3] {
        [Collection::Events, Collection::Attendees, Collection::Tasks]
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How the values of a column are typed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// An integer identifier (`id`, `event_id`). Unparsable values are coerced to `0`
    Id,
    /// Free text. Missing values are back-filled with an empty string
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn id(name: &'static str) -> Column {
    Column { name, kind: ColumnKind::Id }
}
const fn text(name: &'static str) -> Column {
    Column { name, kind: ColumnKind::Text }
}

/// The ordered list of columns of a collection
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    collection: Collection,
    columns: &'static [Column],
}

static EVENTS_SCHEMA: Schema = Schema {
    collection: Collection::Events,
    columns: &[id("id"), text("name"), text("date"), text("time"), text("location"), text("description")],
};

static ATTENDEES_SCHEMA: Schema = Schema {
    collection: Collection::Attendees,
    columns: &[id("event_id"), text("name"), text("email"), text("rsvp"), text("role"), text("dietary")],
};

static TASKS_SCHEMA: Schema = Schema {
    collection: Collection::Tasks,
    columns: &[id("event_id"), text("task_name"), text("status"), text("deadline"), text("priority"), text("assigned_to")],
};

impl Schema {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Build a canonical row from whatever a backend returned.
    ///
    /// Missing columns are back-filled, identifiers are parsed as integers, and extra columns are dropped.
    pub fn normalize(&self, raw: &RawRow) -> Row {
        let cells = self.columns.iter()
            .map(|column| self.coerce(column, raw.get(column.name)))
            .collect();
        Row { collection: self.collection, cells }
    }

    /// Coerce a raw value to the type of `column`
    pub fn coerce(&self, column: &Column, value: Option<&Value>) -> Cell {
        match column.kind {
            ColumnKind::Id => {
                match value.map(parse_id) {
                    Some(Some(id)) => Cell::Int(id),
                    Some(None) => {
                        log::warn!("Non-numeric {}.{} value {}. Using 0 instead", self.collection, column.name, value.unwrap_or(&Value::Null));
                        Cell::Int(0)
                    },
                    None => Cell::Int(0),
                }
            },
            ColumnKind::Text => {
                match value {
                    None | Some(Value::Null) => Cell::Text(String::new()),
                    Some(Value::String(s)) => Cell::Text(s.clone()),
                    Some(other) => Cell::Text(other.to_string()),
                }
            },
        }
    }

    /// Convert a filter value so that it is comparable to the cells of `column`.
    ///
    /// Returns `None` when no cell of that column could ever be equal to it (e.g. a non-numeric identifier)
    pub fn comparable(&self, column: &Column, value: &Cell) -> Option<Cell> {
        match (column.kind, value) {
            (ColumnKind::Id, Cell::Int(i)) => Some(Cell::Int(*i)),
            (ColumnKind::Id, Cell::Text(s)) => parse_id(&Value::String(s.clone())).map(Cell::Int),
            (ColumnKind::Text, Cell::Int(i)) => Some(Cell::Text(i.to_string())),
            (ColumnKind::Text, Cell::Text(s)) => Some(Cell::Text(s.clone())),
        }
    }

    /// Coerce a cell to the type of `column`. Identifiers that cannot be parsed become `0`
    pub fn cast(&self, column: &Column, value: Cell) -> Cell {
        match self.comparable(column, &value) {
            Some(cell) => cell,
            None => self.coerce(column, Some(&Value::String(value.to_string()))),
        }
    }

    /// Does the raw value of `column` in `raw` equal `value`, once both are coerced to the column type?
    pub fn raw_matches(&self, raw: &RawRow, column: &Column, value: &Cell) -> bool {
        match self.comparable(column, value) {
            None => false,
            Some(expected) => self.coerce(column, raw.get(column.name)) == expected,
        }
    }
}

/// Parses an identifier.
/// Spreadsheet-like backends tend to return `3.0` or `"3"` instead of `3`, these are accepted as well.
fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>().ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        },
        _ => None,
    }
}


/// A single typed value
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Text(String),
}

impl Cell {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            Cell::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Int(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Cell::Int(i) => Value::from(*i),
            Cell::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self { Cell::Int(i) }
}
impl From<&str> for Cell {
    fn from(s: &str) -> Self { Cell::Text(s.to_string()) }
}
impl From<String> for Cell {
    fn from(s: String) -> Self { Cell::Text(s) }
}
impl From<Option<String>> for Cell {
    fn from(s: Option<String>) -> Self { Cell::Text(s.unwrap_or_default()) }
}


/// A normalized row: one cell per canonical column, in canonical order
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    collection: Collection,
    cells: Vec<Cell>,
}

impl Row {
    /// Build a row from cells given in canonical column order.
    /// Cells are coerced to their column type, and missing trailing cells are back-filled like [`Schema::normalize`] would.
    pub fn from_cells(collection: Collection, cells: Vec<Cell>) -> Self {
        let schema = collection.schema();
        let mut given = cells.into_iter();
        let cells = schema.columns().iter()
            .map(|column| match given.next() {
                Some(cell) => schema.cast(column, cell),
                None => schema.coerce(column, None),
            })
            .collect();
        Self { collection, cells }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.collection.schema().position(column).map(|pos| &self.cells[pos])
    }

    /// Returns the text of a column, or an empty string for identifiers and unknown columns
    pub fn text(&self, column: &str) -> &str {
        self.get(column).and_then(Cell::as_text).unwrap_or("")
    }

    /// Returns the identifier in a column, or 0 for text and unknown columns
    pub fn int(&self, column: &str) -> i64 {
        self.get(column).and_then(Cell::as_int).unwrap_or(0)
    }

    /// Replace the value of a column.
    ///
    /// The value is coerced to the column type. Returns `false` if there is no such column.
    pub fn set(&mut self, column: &str, value: Cell) -> bool {
        let schema = self.collection.schema();
        let pos = match schema.position(column) {
            None => return false,
            Some(pos) => pos,
        };
        self.cells[pos] = schema.cast(&schema.columns()[pos], value);
        true
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The backend representation of this row
    pub fn to_raw(&self) -> RawRow {
        self.collection.schema().column_names()
            .zip(self.cells.iter())
            .map(|(name, cell)| (name.to_string(), cell.to_value()))
            .collect()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn normalize_backfills_missing_columns() {
        let row = Collection::Attendees.schema().normalize(&raw(json!({"name": "Ada", "event_id": "2"})));
        assert_eq!(row.int("event_id"), 2);
        assert_eq!(row.text("name"), "Ada");
        assert_eq!(row.text("role"), "");
        assert_eq!(row.cells().len(), 6);

        let keys: Vec<String> = row.to_raw().keys().cloned().collect();
        let mut expected: Vec<String> = vec!["event_id", "name", "email", "rsvp", "role", "dietary"].into_iter().map(String::from).collect();
        expected.sort();
        let mut keys = keys;
        keys.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn identifiers_are_coerced() {
        let schema = Collection::Events.schema();
        assert_eq!(schema.normalize(&raw(json!({"id": 4}))).int("id"), 4);
        assert_eq!(schema.normalize(&raw(json!({"id": 4.0}))).int("id"), 4);
        assert_eq!(schema.normalize(&raw(json!({"id": " 7 "}))).int("id"), 7);
        assert_eq!(schema.normalize(&raw(json!({"id": "seven"}))).int("id"), 0);
        assert_eq!(schema.normalize(&raw(json!({"id": null}))).int("id"), 0);
        assert_eq!(schema.normalize(&raw(json!({}))).int("id"), 0);
    }

    #[test]
    fn non_string_text_is_stringified() {
        let row = Collection::Events.schema().normalize(&raw(json!({"id": 1, "time": 1430})));
        assert_eq!(row.text("time"), "1430");
    }

    #[test]
    fn filter_values_are_made_comparable() {
        let schema = Collection::Tasks.schema();
        let event_id = schema.column("event_id").unwrap();
        let name = schema.column("task_name").unwrap();
        assert_eq!(schema.comparable(event_id, &Cell::from("3")), Some(Cell::Int(3)));
        assert_eq!(schema.comparable(event_id, &Cell::from("three")), None);
        assert_eq!(schema.comparable(name, &Cell::Int(3)), Some(Cell::from("3")));

        let r = raw(json!({"event_id": "3", "task_name": "Book venue"}));
        assert!(schema.raw_matches(&r, event_id, &Cell::Int(3)));
        assert!(!schema.raw_matches(&r, event_id, &Cell::Int(4)));
    }

    #[test]
    fn set_coerces_and_rejects_unknown_columns() {
        let mut row = Row::from_cells(Collection::Tasks, vec![Cell::Int(1), Cell::from("Book venue")]);
        assert!(row.set("status", Cell::from("Completed")));
        assert_eq!(row.text("status"), "Completed");
        assert!(row.set("event_id", Cell::from("12")));
        assert_eq!(row.int("event_id"), 12);
        assert!(!row.set("colour", Cell::from("blue")));
    }

    #[test]
    fn from_cells_coerces_given_cells() {
        let row = Row::from_cells(Collection::Attendees, vec![
            Cell::from("5"), Cell::Int(42), Cell::from("ada@example.com"),
            Cell::from("Pending"), Cell::from(""), Cell::from(""), Cell::from("extra"),
        ]);
        assert_eq!(row.get("event_id"), Some(&Cell::Int(5)));
        assert_eq!(row.int("event_id"), 5);
        assert_eq!(row.text("name"), "42");
        assert_eq!(row.cells().len(), 6);

        let row = Row::from_cells(Collection::Tasks, vec![Cell::from("not an id")]);
        assert_eq!(row.get("event_id"), Some(&Cell::Int(0)));
        assert_eq!(row.text("deadline"), "");
    }
}
