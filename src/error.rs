//! Errors returned by backends, the record store and the aggregators

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

use crate::record::EventId;
use crate::schema::Collection;
use crate::store::DeleteReport;

/// A failure of a [`Backend`](crate::traits::Backend)
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed collection file {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected layout in {path:?}: {detail}")]
    Layout { path: PathBuf, detail: String },

    #[error("{0}")]
    Mocked(String),

    #[error("The backend state is poisoned by a previous panic")]
    Poisoned,
}

/// A failure of a [`RecordStore`](crate::RecordStore) operation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No row in {collection} matches {criteria}")]
    NotFound { collection: Collection, criteria: String },

    #[error("Event {0} does not exist")]
    UnknownEvent(EventId),

    #[error("Collection {collection} has no column {column:?}")]
    UnknownColumn { collection: Collection, column: String },

    #[error("Column {column:?} of {collection} is an identifier, it cannot be updated")]
    ReadOnlyColumn { collection: Collection, column: String },

    #[error("No event identifier is left")]
    IdsExhausted,

    #[error("Backend failure: {0}")]
    Backend(#[from] BackendError),

    #[error("Deleting event {event_id} only partially succeeded: {}", CascadeFailures(.failed))]
    PartialCascade {
        event_id: EventId,
        /// The collections whose delete succeeded
        succeeded: Vec<Collection>,
        /// The collections whose delete failed, and why
        failed: Vec<(Collection, BackendError)>,
    },

    #[error("Deleting some of the matching events failed: {}", EventFailures(.failures))]
    IncompleteDelete {
        /// What the successful deletes removed
        report: DeleteReport,
        failures: Vec<(EventId, StoreError)>,
    },

    #[error(transparent)]
    Distribution(#[from] DistributionError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. } | StoreError::UnknownEvent(_))
    }
}

struct CascadeFailures<'a>(&'a [(Collection, BackendError)]);

impl Display for CascadeFailures<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (collection, err)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} ({})", collection, err)?;
        }
        Ok(())
    }
}

struct EventFailures<'a>(&'a [(EventId, StoreError)]);

impl Display for EventFailures<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (id, err)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "event {} ({})", id, err)?;
        }
        Ok(())
    }
}

/// Why a [`Distribution`](crate::analytics::Distribution) could not be computed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("There are no rows to count")]
    EmptyRows,

    #[error("Column {0:?} not found in the data")]
    UnknownColumn(String),
}
