//! Persistence Store: durable key/value storage and the queue snapshot.
//!
//! Keys are plain names inside one namespace; a namespace is a directory (or
//! a separate in-memory map), so independent components never share keys.

mod file;
mod memory;
mod snapshot;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use snapshot::{QUEUE_KEY, QueueSnapshot, QueueStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage I/O failed for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode value: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Whole-value key/value storage. Each `write` replaces the previous value
/// atomically; readers see either the old or the new value, never a mix.
pub trait Storage: Send {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: Storage + Sync> Storage for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
