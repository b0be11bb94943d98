use std::{
    cell::Cell,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use super::{BrightnessController, BrightnessValue, ProtocolError};

/// A mock [BrightnessController], usable when testing code using the trait.
///
/// Clones share their state, so a test can keep one clone around and inspect
/// what the code under test did with the other.
#[derive(Clone)]
pub struct MockBrightnessController {
    percentage: Arc<Mutex<Cell<BrightnessValue>>>,
    should_fail_reads: Arc<Mutex<Cell<bool>>>,
    should_fail_writes: Arc<Mutex<Cell<bool>>>,
    reads: Arc<Mutex<Cell<usize>>>,
    writes: Arc<Mutex<Vec<BrightnessValue>>>,
}

impl MockBrightnessController {
    /// Create a new controller, with the specified initial brightness
    pub fn new(initial_brightness: BrightnessValue) -> MockBrightnessController {
        MockBrightnessController {
            percentage: Arc::new(Mutex::new(Cell::new(initial_brightness))),
            should_fail_reads: Arc::new(Mutex::new(Cell::new(false))),
            should_fail_writes: Arc::new(Mutex::new(Cell::new(false))),
            reads: Arc::new(Mutex::new(Cell::new(0))),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set whether operations on this controller should return an error or not
    pub fn set_failure_mode(&self, should_fail: bool) {
        self.set_read_failure_mode(should_fail);
        self.set_write_failure_mode(should_fail);
    }

    pub fn set_read_failure_mode(&self, should_fail: bool) {
        self.should_fail_reads.lock().unwrap().set(should_fail);
    }

    pub fn set_write_failure_mode(&self, should_fail: bool) {
        self.should_fail_writes.lock().unwrap().set(should_fail);
    }

    /// Number of times the brightness was queried, successfully or not
    pub fn read_count(&self) -> usize {
        self.reads.lock().unwrap().get()
    }

    /// Every value a write was attempted with, in order
    pub fn writes(&self) -> Vec<BrightnessValue> {
        self.writes.lock().unwrap().clone()
    }

    /// The brightness the simulated display currently has
    pub fn current(&self) -> BrightnessValue {
        self.percentage.lock().unwrap().get()
    }
}

#[async_trait]
impl BrightnessController for MockBrightnessController {
    async fn get_brightness(&self) -> Result<BrightnessValue, ProtocolError> {
        {
            let reads = self.reads.lock().unwrap();
            reads.set(reads.get() + 1);
        }
        if self.should_fail_reads.lock().unwrap().get() {
            Err(ProtocolError::MissingField("Brightness".to_owned()))
        } else {
            Ok(self.percentage.lock().unwrap().get())
        }
    }

    async fn set_brightness(&self, value: BrightnessValue) -> Result<(), ProtocolError> {
        self.writes.lock().unwrap().push(value);
        if self.should_fail_writes.lock().unwrap().get() {
            return Err(ProtocolError::InvalidValue {
                line: "Mock BrightnessController is failing".to_owned(),
            });
        }
        self.percentage.lock().unwrap().set(value);
        Ok(())
    }
}
