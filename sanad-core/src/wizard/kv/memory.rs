//! In-memory implementation of `KvStore`.
//!
//! All state is lost when the store is dropped. This is the default backend
//! for tests and for sessions that do not opt into durability.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use super::KvStore;

/// In-memory key-value store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}
