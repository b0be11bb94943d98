use std::{
    cell::Cell,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use super::{parse_saved_value, StateStore, StateStoreError};
use crate::external::brightness::BrightnessValue;

/// A mock [StateStore] holding the "file" contents in memory.
///
/// Clones share their contents.
#[derive(Clone)]
pub struct MockStateStore {
    contents: Arc<Mutex<Option<String>>>,
    should_fail_writes: Arc<Mutex<Cell<bool>>>,
    saves: Arc<Mutex<Cell<usize>>>,
}

impl MockStateStore {
    /// Create a store with nothing saved in it yet
    pub fn empty() -> MockStateStore {
        MockStateStore {
            contents: Arc::new(Mutex::new(None)),
            should_fail_writes: Arc::new(Mutex::new(Cell::new(false))),
            saves: Arc::new(Mutex::new(Cell::new(0))),
        }
    }

    /// Create a store which already contains the given value
    pub fn with_value(value: BrightnessValue) -> MockStateStore {
        Self::with_contents(&value.to_string())
    }

    /// Create a store containing arbitrary raw text
    pub fn with_contents(contents: &str) -> MockStateStore {
        let store = Self::empty();
        *store.contents.lock().unwrap() = Some(contents.to_owned());
        store
    }

    /// Set whether saving into this store should fail
    pub fn set_write_failure_mode(&self, should_fail: bool) {
        self.should_fail_writes.lock().unwrap().set(should_fail);
    }

    /// The raw saved text, None if nothing was ever saved
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    /// Number of attempted saves
    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().get()
    }
}

#[async_trait]
impl StateStore for MockStateStore {
    async fn load(&self) -> Result<BrightnessValue, StateStoreError> {
        match self.contents() {
            Some(contents) => parse_saved_value(&contents),
            None => Err(StateStoreError::NotFound("mock".into())),
        }
    }

    async fn save(&self, value: BrightnessValue) -> Result<(), StateStoreError> {
        {
            let saves = self.saves.lock().unwrap();
            saves.set(saves.get() + 1);
        }
        if self.should_fail_writes.lock().unwrap().get() {
            return Err(StateStoreError::Write {
                path: "mock".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Mock failure"),
            });
        }
        *self.contents.lock().unwrap() = Some(value.to_string());
        Ok(())
    }
}
