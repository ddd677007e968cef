//! A backend that keeps its collections in memory

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::BackendError;
use crate::mock_behaviour::MockBehaviour;
use crate::schema::{Cell, Collection, RawRow};
use crate::traits::Backend;

/// A [`Backend`] that holds its collections in memory.
///
/// It can be given a [`MockBehaviour`], so that some calls fail on purpose.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    collections: HashMap<Collection, Vec<RawRow>>,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend whose calls are allowed or failed according to `behaviour`
    pub fn with_mock_behaviour(behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            collections: HashMap::new(),
            mock_behaviour: Some(behaviour),
        }
    }

    pub fn set_mock_behaviour(&mut self, behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = behaviour;
    }

    /// Replace a collection with arbitrary (possibly malformed) rows, bypassing any mock behaviour
    pub fn insert_raw(&mut self, collection: Collection, rows: Vec<RawRow>) {
        self.collections.insert(collection, rows);
    }

    /// The rows currently stored for a collection, bypassing any mock behaviour
    pub fn raw(&self, collection: Collection) -> &[RawRow] {
        self.collections.get(&collection).map(|rows| rows.as_slice()).unwrap_or(&[])
    }

    fn check(&self, action: fn(&mut MockBehaviour) -> Result<(), BackendError>) -> Result<(), BackendError> {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => {
                let mut behaviour = behaviour.lock().map_err(|_| BackendError::Poisoned)?;
                action(&mut behaviour)
            }
        }
    }
}

impl Backend for MemoryBackend {
    fn load(&self, collection: Collection) -> Result<Vec<RawRow>, BackendError> {
        self.check(MockBehaviour::can_load)?;
        Ok(self.raw(collection).to_vec())
    }

    fn save(&mut self, collection: Collection, rows: &[RawRow]) -> Result<(), BackendError> {
        self.check(MockBehaviour::can_save)?;
        self.collections.insert(collection, rows.to_vec());
        Ok(())
    }

    fn delete(&mut self, collection: Collection, column: &str, value: &Cell) -> Result<usize, BackendError> {
        self.check(MockBehaviour::can_delete)?;
        let rows = match self.collections.remove(&collection) {
            None => return Ok(0),
            Some(rows) => rows,
        };
        let (kept, removed) = super::remove_matching(collection, rows, column, value);
        self.collections.insert(collection, kept);
        Ok(removed)
    }
}
