//! Support for library configuration options

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

use crate::task::Priority;

/// Environment variable that overrides [`DATA_FOLDER`] when read through [`data_folder`]
pub const DATA_FOLDER_ENV: &str = "EVENT_LEDGER_DATA";

/// The folder used by [`JsonFolder`](crate::backend::json_folder::JsonFolder) when no explicit path is given.
/// Feel free to override it when initing this library.
pub static DATA_FOLDER: Lazy<Arc<Mutex<PathBuf>>> = Lazy::new(|| Arc::new(Mutex::new(PathBuf::from("event_data"))));

/// Priority given to tasks created without an explicit one.
/// Feel free to override it (or to set it to `None`) when initing this library.
pub static DEFAULT_TASK_PRIORITY: Lazy<Arc<Mutex<Option<Priority>>>> = Lazy::new(|| Arc::new(Mutex::new(Some(Priority::Medium))));

/// Returns the data folder: the `EVENT_LEDGER_DATA` environment variable if it is set, [`DATA_FOLDER`] otherwise
pub fn data_folder() -> PathBuf {
    if let Some(path) = std::env::var_os(DATA_FOLDER_ENV) {
        if path.is_empty() == false {
            return PathBuf::from(path);
        }
    }
    match DATA_FOLDER.lock() {
        Ok(folder) => folder.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn default_task_priority() -> Option<Priority> {
    match DEFAULT_TASK_PRIORITY.lock() {
        Ok(priority) => *priority,
        Err(poisoned) => *poisoned.into_inner(),
    }
}
