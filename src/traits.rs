use crate::error::BackendError;
use crate::schema::{Cell, Collection, RawRow};

/// A persistence backend, that stores whole collections of rows (e.g. a folder of files, or a spreadsheet)
///
/// Writes always replace a full collection. There is no locking and no versioning: when several writers share a backend, the last write wins.
pub trait Backend {
    /// Returns every row of a collection.
    /// A collection that does not exist (yet) must be returned as an empty `Vec`, not as an error.
    fn load(&self, collection: Collection) -> Result<Vec<RawRow>, BackendError>;

    /// Replace the whole content of a collection
    fn save(&mut self, collection: Collection, rows: &[RawRow]) -> Result<(), BackendError>;

    /// Remove every row whose `column` equals `value` (once coerced to the column type).
    /// Returns the number of removed rows. Deleting from a collection that does not exist removes nothing.
    fn delete(&mut self, collection: Collection, column: &str, value: &Cell) -> Result<usize, BackendError>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn load(&self, collection: Collection) -> Result<Vec<RawRow>, BackendError> {
        (**self).load(collection)
    }

    fn save(&mut self, collection: Collection, rows: &[RawRow]) -> Result<(), BackendError> {
        (**self).save(collection, rows)
    }

    fn delete(&mut self, collection: Collection, column: &str, value: &Cell) -> Result<usize, BackendError> {
        (**self).delete(collection, column, value)
    }
}
