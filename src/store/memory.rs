use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{Storage, StoreError, validate_key};

/// In-process storage. Clones share the same map, which lets a test drop a
/// queue manager and build a new one over the "same disk".
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self
            .values
            .lock()
            .ok()
            .and_then(|m| m.get(key).cloned()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        if let Ok(mut m) = self.values.lock() {
            m.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}
