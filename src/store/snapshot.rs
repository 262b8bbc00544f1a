use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::library::Track;

use super::{Storage, StoreError};

/// Storage key of the persisted queue inside its namespace.
pub const QUEUE_KEY: &str = "queue_v1";

/// Serialized form of the queue: `{ "queue": [...], "currentIndex": n }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSnapshot {
    #[serde(default)]
    pub queue: Vec<Track>,
    #[serde(default)]
    pub current_index: usize,
}

/// Reads and writes the queue snapshot. Failures are logged and swallowed:
/// a failed save keeps the last good snapshot, a failed load reads as
/// "nothing saved".
pub struct QueueStore<S: Storage> {
    storage: S,
}

impl<S: Storage> QueueStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns whether the snapshot was written.
    pub fn save(&self, snapshot: &QueueSnapshot) -> bool {
        match self.try_save(snapshot) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to persist queue; keeping previous snapshot");
                false
            }
        }
    }

    pub fn load(&self) -> Option<QueueSnapshot> {
        match self.try_load() {
            Ok(Some(snapshot)) => Some(snapshot),
            Ok(None) => {
                debug!("no persisted queue");
                None
            }
            Err(e) => {
                warn!(error = %e, "failed to read persisted queue; starting empty");
                None
            }
        }
    }

    fn try_save(&self, snapshot: &QueueSnapshot) -> Result<(), StoreError> {
        let raw = serde_json::to_string(snapshot).map_err(StoreError::Encode)?;
        self.storage.write(QUEUE_KEY, &raw)
    }

    fn try_load(&self) -> Result<Option<QueueSnapshot>, StoreError> {
        let Some(raw) = self.storage.read(QUEUE_KEY)? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_str(&raw).map_err(StoreError::Decode)?;
        Ok(Some(snapshot))
    }
}
