//! The record store: identity assignment, filtering, updates and cascading deletes over a [`Backend`]
//!
//! Every operation loads the collection it needs, works on this snapshot, and writes the whole collection back.
//! Nothing is cached between calls.

use std::ops::AddAssign;

use itertools::Itertools;

use crate::analytics::{self, Distribution, EventReport, TimelineEntry};
use crate::attendee::{Attendee, NewAttendee, Rsvp};
use crate::error::{BackendError, StoreError};
use crate::event::{Event, NewEvent};
use crate::record::{EventId, Record};
use crate::schema::{Cell, Collection, ColumnKind, Row};
use crate::task::{NewTask, Task, TaskStatus};
use crate::traits::Backend;

/// How many rows a delete removed, per collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub events: usize,
    pub attendees: usize,
    pub tasks: usize,
}

impl DeleteReport {
    pub fn removed(&self, collection: Collection) -> usize {
        match collection {
            Collection::Events => self.events,
            Collection::Attendees => self.attendees,
            Collection::Tasks => self.tasks,
        }
    }

    pub fn total(&self) -> usize {
        self.events + self.attendees + self.tasks
    }

    fn record(&mut self, collection: Collection, removed: usize) {
        match collection {
            Collection::Events => self.events += removed,
            Collection::Attendees => self.attendees += removed,
            Collection::Tasks => self.tasks += removed,
        }
    }
}

impl AddAssign for DeleteReport {
    fn add_assign(&mut self, other: Self) {
        self.events += other.events;
        self.attendees += other.attendees;
        self.tasks += other.tasks;
    }
}


/// Manages events, attendees and tasks stored in a [`Backend`]
///
/// There is no locking: two stores sharing the same storage will overwrite each other's changes (last write wins).
#[derive(Debug)]
pub struct RecordStore<B: Backend> {
    backend: B,
    /// The highest event id this store has issued, so that ids of deleted events are not handed out again
    last_issued_id: i64,
}

impl<B: Backend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, last_issued_id: 0 }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    //
    // Generic operations
    //

    /// Load a collection, and normalize its rows
    fn load_rows(&self, collection: Collection) -> Result<Vec<Row>, BackendError> {
        let schema = collection.schema();
        let raw = self.backend.load(collection)?;
        Ok(raw.iter().map(|row| schema.normalize(row)).collect())
    }

    /// Load a collection for reading. A collection that cannot be loaded is considered empty
    fn load_rows_or_empty(&self, collection: Collection) -> Vec<Row> {
        match self.load_rows(collection) {
            Ok(rows) => rows,
            Err(err) => {
                log::warn!("Unable to load {}: {}. Using an empty collection instead", collection, err);
                Vec::new()
            }
        }
    }

    fn save_rows(&mut self, collection: Collection, rows: &[Row]) -> Result<(), StoreError> {
        let raw: Vec<_> = rows.iter().map(Row::to_raw).collect();
        self.backend.save(collection, &raw).map_err(|err| {
            log::error!("Unable to save {}: {}", collection, err);
            StoreError::from(err)
        })
    }

    /// Returns the rows of a collection whose `filter` column equals the filter value (once coerced to the column type),
    /// or every row if there is no filter.
    ///
    /// A collection that cannot be loaded is returned as empty. The only error is a filter on an unknown column.
    pub fn list(&self, collection: Collection, filter: Option<(&str, &Cell)>) -> Result<Vec<Row>, StoreError> {
        let schema = collection.schema();
        let rows = self.load_rows_or_empty(collection);

        let (key, value) = match filter {
            None => return Ok(rows),
            Some(f) => f,
        };
        let column = schema.column(key).ok_or_else(|| StoreError::UnknownColumn { collection, column: key.to_string() })?;
        let expected = match schema.comparable(column, value) {
            None => {
                log::debug!("{:?} can never match {}.{}", value, collection, key);
                return Ok(Vec::new());
            },
            Some(v) => v,
        };

        Ok(rows.into_iter()
            .filter(|row| row.get(key) == Some(&expected))
            .collect())
    }

    /// Append a row to a collection.
    ///
    /// Rows added to [`Collection::Events`] are given a fresh `id` (whatever their `id` cell contains). The stored row is returned.
    pub fn add(&mut self, collection: Collection, row: Row) -> Result<Row, StoreError> {
        let mut rows = self.load_rows(collection)?;
        let mut row = Row::from_cells(collection, row.cells().to_vec());

        if collection == Collection::Events {
            let id = self.next_event_id(&rows)?;
            row.set("id", Cell::Int(id.get()));
            self.last_issued_id = id.get();
        }

        rows.push(row.clone());
        self.save_rows(collection, &rows)?;
        Ok(row)
    }

    fn next_event_id(&self, events: &[Row]) -> Result<EventId, StoreError> {
        let max_existing = events.iter().map(|row| row.int("id")).max().unwrap_or(0);
        max_existing.max(self.last_issued_id)
            .checked_add(1)
            .map(EventId::new)
            .ok_or(StoreError::IdsExhausted)
    }

    /// Set `field` to `new_value` on every row that matches all `match_keys`.
    ///
    /// Returns how many rows were updated. Nothing is written if no row matches.
    /// Identifier columns (`id`, `event_id`) cannot be updated.
    pub fn update_field(&mut self, collection: Collection, match_keys: &[(&str, Cell)], field: &str, new_value: Cell) -> Result<usize, StoreError> {
        let schema = collection.schema();
        match schema.column(field) {
            None => return Err(StoreError::UnknownColumn { collection, column: field.to_string() }),
            Some(column) if column.kind == ColumnKind::Id => {
                return Err(StoreError::ReadOnlyColumn { collection, column: field.to_string() });
            },
            Some(_) => {},
        }

        let mut expected = Vec::with_capacity(match_keys.len());
        for (key, value) in match_keys {
            let column = schema.column(key).ok_or_else(|| StoreError::UnknownColumn { collection, column: key.to_string() })?;
            expected.push((*key, schema.comparable(column, value)));
        }
        let criteria = describe(match_keys);

        // A key that cannot be compared to its column matches nothing
        if expected.iter().any(|(_, value)| value.is_none()) {
            return Err(StoreError::NotFound { collection, criteria });
        }

        let mut rows = self.load_rows(collection)?;
        let mut updated = 0;
        for row in rows.iter_mut() {
            let matches = expected.iter().all(|(key, value)| row.get(key) == value.as_ref());
            if matches {
                row.set(field, new_value.clone());
                updated += 1;
            }
        }

        if updated == 0 {
            return Err(StoreError::NotFound { collection, criteria });
        }
        self.save_rows(collection, &rows)?;
        log::debug!("Updated {}.{} on {} row(s) matching {}", collection, field, updated, criteria);
        Ok(updated)
    }

    /// Remove the rows whose `key` column equals `value`.
    ///
    /// Deleting events also deletes their attendees and tasks (see [`Self::delete_event`]).
    /// When several events match, each of them is deleted independently, and [`StoreError::IncompleteDelete`] lists the ones that failed.
    pub fn delete(&mut self, collection: Collection, key: &str, value: &Cell) -> Result<DeleteReport, StoreError> {
        let schema = collection.schema();
        let column = schema.column(key).ok_or_else(|| StoreError::UnknownColumn { collection, column: key.to_string() })?;

        if collection == Collection::Events {
            if key == "id" {
                let id = match schema.comparable(column, value) {
                    Some(Cell::Int(id)) => id,
                    _ => return Err(StoreError::NotFound { collection, criteria: format!("id = {}", value) }),
                };
                return self.delete_event(EventId::new(id));
            }

            // Resolve the ids first, so that the dependent rows can be found
            let expected = schema.comparable(column, value);
            let matching: Vec<EventId> = self.load_rows(collection)?
                .iter()
                .filter(|row| expected.is_some() && row.get(key) == expected.as_ref())
                .map(|row| EventId::new(row.int("id")))
                .unique()
                .collect();
            if matching.is_empty() {
                return Err(StoreError::NotFound { collection, criteria: format!("{} = {}", key, value) });
            }

            // Every event is attempted, even after a failure
            let mut report = DeleteReport::default();
            let mut failures = Vec::new();
            for id in matching {
                match self.delete_event(id) {
                    Ok(removed) => report += removed,
                    Err(err) => failures.push((id, err)),
                }
            }
            if failures.is_empty() == false {
                return Err(StoreError::IncompleteDelete { report, failures });
            }
            return Ok(report);
        }

        let removed = self.backend.delete(collection, key, value).map_err(|err| {
            log::error!("Unable to delete from {}: {}", collection, err);
            StoreError::from(err)
        })?;
        if removed == 0 {
            return Err(StoreError::NotFound { collection, criteria: format!("{} = {}", key, value) });
        }
        let mut report = DeleteReport::default();
        report.record(collection, removed);
        Ok(report)
    }

    //
    // Events
    //

    pub fn list_events(&self) -> Vec<Event> {
        self.records(None)
    }

    pub fn get_event(&self, id: EventId) -> Result<Event, StoreError> {
        self.list_events()
            .into_iter()
            .find(|event| event.id() == id)
            .ok_or_else(|| StoreError::NotFound { collection: Collection::Events, criteria: format!("id = {}", id) })
    }

    /// Create an event, and return its new identifier
    pub fn add_event(&mut self, draft: NewEvent) -> Result<EventId, StoreError> {
        // The id is a placeholder, `add` picks the actual one
        let event = Event::new(EventId::new(0), draft);
        let stored = self.add(Collection::Events, event.to_row())?;
        let id = EventId::new(stored.int("id"));
        log::info!("Created event {} ({})", id, event.name());
        Ok(id)
    }

    /// Delete an event, with its attendees and tasks.
    ///
    /// The three collections are cleaned up independently: a failure in one of them does not prevent (nor revert) the others.
    /// In this case, [`StoreError::PartialCascade`] tells which ones failed.
    /// If the event itself does not exist, this returns [`StoreError::NotFound`], once possible orphan attendees and tasks have been removed.
    pub fn delete_event(&mut self, id: EventId) -> Result<DeleteReport, StoreError> {
        let value = Cell::Int(id.get());
        let mut report = DeleteReport::default();
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        let targets = [
            (Collection::Events, "id"),
            (Collection::Attendees, "event_id"),
            (Collection::Tasks, "event_id"),
        ];
        for (collection, column) in targets.iter() {
            match self.backend.delete(*collection, column, &value) {
                Ok(removed) => {
                    report.record(*collection, removed);
                    succeeded.push(*collection);
                },
                Err(err) => {
                    log::error!("Unable to delete {} of event {}: {}", collection, id, err);
                    failed.push((*collection, err));
                },
            }
        }

        if failed.is_empty() == false {
            return Err(StoreError::PartialCascade { event_id: id, succeeded, failed });
        }
        if report.events == 0 {
            return Err(StoreError::NotFound { collection: Collection::Events, criteria: format!("id = {}", id) });
        }
        log::info!("Deleted event {} with {} attendee(s) and {} task(s)", id, report.attendees, report.tasks);
        Ok(report)
    }

    //
    // Attendees
    //

    /// List the attendees, of all events or of a single one
    pub fn list_attendees(&self, event_id: Option<EventId>) -> Vec<Attendee> {
        self.records(event_id.map(|id| ("event_id", Cell::Int(id.get()))))
    }

    /// Add an attendee to an existing event
    pub fn add_attendee(&mut self, draft: NewAttendee) -> Result<(), StoreError> {
        self.ensure_event_exists(draft.event_id)?;
        let attendee = Attendee::new(draft);
        self.add(Collection::Attendees, attendee.to_row())?;
        Ok(())
    }

    /// Change the RSVP of every attendee with this email (optionally, only within one event).
    ///
    /// Returns how many attendees were updated
    pub fn update_rsvp(&mut self, email: &str, rsvp: Rsvp, event_id: Option<EventId>) -> Result<usize, StoreError> {
        let mut keys = vec![("email", Cell::from(email))];
        if let Some(id) = event_id {
            keys.push(("event_id", Cell::Int(id.get())));
        }
        self.update_field(Collection::Attendees, &keys, "rsvp", Cell::from(rsvp.label()))
    }

    /// How the attendees of an event are split by the value of `column` (e.g. `role`, `dietary`, `rsvp`)
    pub fn attendee_breakdown(&self, event_id: EventId, column: &str) -> Result<Distribution, StoreError> {
        let attendees = self.list_attendees(Some(event_id));
        Ok(analytics::distribution(&attendees, column)?)
    }

    //
    // Tasks
    //

    /// List the tasks, of all events or of a single one
    pub fn list_tasks(&self, event_id: Option<EventId>) -> Vec<Task> {
        self.records(event_id.map(|id| ("event_id", Cell::Int(id.get()))))
    }

    /// Add a task to an existing event
    pub fn add_task(&mut self, draft: NewTask) -> Result<(), StoreError> {
        self.ensure_event_exists(draft.event_id)?;
        let task = Task::new(draft);
        self.add(Collection::Tasks, task.to_row())?;
        Ok(())
    }

    /// Change the status of every task of this event that has this name.
    ///
    /// Returns how many tasks were updated
    pub fn update_task_status(&mut self, event_id: EventId, task_name: &str, status: TaskStatus) -> Result<usize, StoreError> {
        let keys = [("event_id", Cell::Int(event_id.get())), ("task_name", Cell::from(task_name))];
        self.update_field(Collection::Tasks, &keys, "status", Cell::from(status.label()))
    }

    pub fn task_status_breakdown(&self, event_id: EventId) -> Result<Distribution, StoreError> {
        let tasks = self.list_tasks(Some(event_id));
        Ok(analytics::distribution(&tasks, "status")?)
    }

    //
    // Derived views
    //

    pub fn event_timeline(&self, event_id: EventId) -> Result<Vec<TimelineEntry>, StoreError> {
        let event = self.get_event(event_id)?;
        Ok(analytics::timeline(&event, &self.list_tasks(Some(event_id))))
    }

    pub fn event_report(&self, event_id: EventId) -> Result<EventReport, StoreError> {
        let event = self.get_event(event_id)?;
        let attendees = self.list_attendees(Some(event_id));
        let tasks = self.list_tasks(Some(event_id));
        Ok(analytics::report(&event, &attendees, &tasks))
    }

    //
    // Helpers
    //

    fn records<R: Record>(&self, filter: Option<(&str, Cell)>) -> Vec<R> {
        let rows = match self.list(R::COLLECTION, filter.as_ref().map(|(key, value)| (*key, value))) {
            Ok(rows) => rows,
            Err(err) => {
                log::error!("Unable to list {}: {}", R::COLLECTION, err);
                Vec::new()
            }
        };
        rows.iter().map(R::from_row).collect()
    }

    /// Attendees and tasks can only be added to events that exist
    fn ensure_event_exists(&self, id: EventId) -> Result<(), StoreError> {
        let events = self.load_rows(Collection::Events)?;
        if events.iter().any(|row| row.int("id") == id.get()) {
            Ok(())
        } else {
            Err(StoreError::UnknownEvent(id))
        }
    }
}

fn describe(keys: &[(&str, Cell)]) -> String {
    keys.iter()
        .map(|(key, value)| format!("{} = {:?}", key, value.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}
