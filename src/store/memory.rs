use super::KeyValueStore;
use crate::error::AppError;
use crate::safe_lock;
use std::collections::HashMap;
use std::sync::Mutex;

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        safe_lock(&self.entries, "MemoryStore").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(safe_lock(&self.entries, "MemoryStore").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        safe_lock(&self.entries, "MemoryStore").insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        safe_lock(&self.entries, "MemoryStore").remove(key);
        Ok(())
    }
}
