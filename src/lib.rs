//! This crate manages events, their attendees and their tasks.
//!
//! Records are persisted by a [`Backend`](traits::Backend), that stores whole collections of rows (see the [`backend`] module for the provided ones). \
//! On top of it, a [`RecordStore`] assigns event identifiers, filters records by event, and keeps attendees and tasks consistent with their event (deleting an event deletes its attendees and tasks).
//!
//! The [`analytics`] module turns records into derived views: distributions, timelines and textual reports.

pub mod traits;
pub mod schema;
pub mod record;
pub use record::EventId;

mod event;
pub use event::{Event, NewEvent};
mod attendee;
pub use attendee::{Attendee, NewAttendee, Rsvp};
mod task;
pub use task::{NewTask, Priority, Task, TaskStatus};

pub mod store;
pub use store::{DeleteReport, RecordStore};
pub mod backend;
pub mod mock_behaviour;
pub mod analytics;
pub mod error;
pub use error::{BackendError, DistributionError, StoreError};

pub mod config;
pub mod utils;
