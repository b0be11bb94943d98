use std::{
    cell::Cell,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use async_trait::async_trait;

use super::Notifier;

/// A mock [Notifier] remembering every message it was asked to show.
#[derive(Clone, Default)]
pub struct MockNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    should_fail: Arc<Mutex<Cell<bool>>>,
}

impl MockNotifier {
    pub fn new() -> MockNotifier {
        MockNotifier::default()
    }

    /// Set whether notifications should fail (after being recorded)
    pub fn set_failure_mode(&self, should_fail: bool) {
        self.should_fail.lock().unwrap().set(should_fail);
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        self.messages.lock().unwrap().push(message.to_owned());
        if self.should_fail.lock().unwrap().get() {
            Err(anyhow::anyhow!("Mock Notifier is failing"))
        } else {
            Ok(())
        }
    }
}
