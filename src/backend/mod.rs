//! Persistence backends
//!
//! Two backends are provided:
//! * [`JsonFolder`](json_folder::JsonFolder) stores each collection in a JSON file inside a folder
//! * [`MemoryBackend`](memory::MemoryBackend) keeps collections in memory. It can be told to fail on purpose (see [`MockBehaviour`](crate::mock_behaviour::MockBehaviour)), which is mostly useful for tests
//!
//! Any other storage (e.g. a cloud spreadsheet) can be used by implementing [`Backend`](crate::traits::Backend).

pub mod json_folder;
pub mod memory;

use crate::schema::{Cell, Collection, RawRow};

/// Split `rows` between those that are kept and those whose `column` equals `value`.
/// Returns the kept rows and the count of removed ones.
pub(crate) fn remove_matching(collection: Collection, rows: Vec<RawRow>, column: &str, value: &Cell) -> (Vec<RawRow>, usize) {
    let schema = collection.schema();
    let column = match schema.column(column) {
        None => {
            log::warn!("Cannot delete by unknown column {}.{}", collection, column);
            return (rows, 0);
        },
        Some(c) => c,
    };

    let before = rows.len();
    let kept: Vec<RawRow> = rows.into_iter()
        .filter(|row| schema.raw_matches(row, column, value) == false)
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}
