//! A backend that stores every collection as a JSON file inside a folder

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::BackendError;
use crate::schema::{Cell, Collection, RawRow};
use crate::traits::Backend;

/// A [`Backend`] that stores each collection in `<folder>/<collection name>.json`, as an array of objects.
///
/// Files are rewritten as a whole on every write. They are first written next to their final location, then renamed, so that a crash never leaves a truncated file behind.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonFolder {
    backing_folder: PathBuf,
}

impl JsonFolder {
    /// Use an existing folder, or a folder that will be created on the first write
    pub fn new(folder: &Path) -> Self {
        Self {
            backing_folder: PathBuf::from(folder),
        }
    }

    /// Use the folder set in the crate configuration (see [`crate::config::data_folder`])
    pub fn from_config() -> Self {
        Self::new(&crate::config::data_folder())
    }

    pub fn folder(&self) -> &Path {
        &self.backing_folder
    }

    /// Get the path to the file of a collection
    pub fn collection_file(&self, collection: Collection) -> PathBuf {
        let file_name = sanitize_filename::sanitize(collection.name()) + ".json";
        self.backing_folder.join(file_name)
    }

    fn read_rows(&self, collection: Collection) -> Result<Vec<RawRow>, BackendError> {
        let path = self.collection_file(collection);
        let content = match std::fs::read_to_string(&path) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No file for collection {} at {:?} yet", collection, path);
                return Ok(Vec::new());
            },
            Err(err) => return Err(BackendError::Io { path, source: err }),
            Ok(content) => content,
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&content)
            .map_err(|err| BackendError::Malformed { path: path.clone(), source: err })?;
        let items = match value {
            Value::Array(items) => items,
            Value::Null => return Ok(Vec::new()),
            other => {
                return Err(BackendError::Layout { path, detail: format!("expected an array of rows, got {}", json_type(&other)) });
            }
        };

        let mut rows = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(row) => rows.push(row),
                other => {
                    log::warn!("Ignoring row #{} of {:?}: expected an object, got {}", index, path, json_type(&other));
                },
            }
        }
        Ok(rows)
    }

    fn write_rows(&self, collection: Collection, rows: &[RawRow]) -> Result<(), BackendError> {
        let path = self.collection_file(collection);
        std::fs::create_dir_all(&self.backing_folder)
            .map_err(|err| BackendError::Io { path: self.backing_folder.clone(), source: err })?;

        let tmp_path = self.backing_folder.join(format!(".{}.{}.tmp", collection.name(), uuid::Uuid::new_v4().to_hyphenated()));
        let file = std::fs::File::create(&tmp_path)
            .map_err(|err| BackendError::Io { path: tmp_path.clone(), source: err })?;

        if let Err(err) = serde_json::to_writer_pretty(file, rows) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(BackendError::Malformed { path: tmp_path, source: err });
        }

        if let Err(err) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(BackendError::Io { path, source: err });
        }
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Backend for JsonFolder {
    fn load(&self, collection: Collection) -> Result<Vec<RawRow>, BackendError> {
        self.read_rows(collection)
    }

    fn save(&mut self, collection: Collection, rows: &[RawRow]) -> Result<(), BackendError> {
        self.write_rows(collection, rows)?;
        log::debug!("Saved {} rows to {:?}", rows.len(), self.collection_file(collection));
        Ok(())
    }

    fn delete(&mut self, collection: Collection, column: &str, value: &Cell) -> Result<usize, BackendError> {
        let path = self.collection_file(collection);
        if path.exists() == false {
            return Ok(0);
        }

        let rows = self.read_rows(collection)?;
        let (kept, removed) = super::remove_matching(collection, rows, column, value);
        if removed > 0 {
            self.write_rows(collection, &kept)?;
        }
        Ok(removed)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn collection_files() {
        let backend = JsonFolder::new(Path::new("/tmp/some/folder"));
        assert_eq!(backend.collection_file(Collection::Attendees), PathBuf::from("/tmp/some/folder/attendees.json"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFolder::new(dir.path());
        let rows = vec![json!({"id": 1, "name": "Gala"}).as_object().cloned().unwrap()];

        backend.save(Collection::Events, &rows).unwrap();
        assert_eq!(backend.load(Collection::Events).unwrap(), rows);

        // No temporary file is left behind
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn odd_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFolder::new(dir.path());

        std::fs::write(backend.collection_file(Collection::Tasks), "  \n").unwrap();
        assert!(backend.load(Collection::Tasks).unwrap().is_empty());

        std::fs::write(backend.collection_file(Collection::Tasks), "[{\"task_name\": \"a\"}, 12]").unwrap();
        assert_eq!(backend.load(Collection::Tasks).unwrap().len(), 1);

        std::fs::write(backend.collection_file(Collection::Tasks), "{\"task_name\": \"a\"}").unwrap();
        assert!(matches!(backend.load(Collection::Tasks), Err(BackendError::Layout { .. })));

        std::fs::write(backend.collection_file(Collection::Tasks), "[{").unwrap();
        assert!(matches!(backend.load(Collection::Tasks), Err(BackendError::Malformed { .. })));
    }
}
