use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::library::Track;
use crate::store::{QueueSnapshot, QueueStore, Storage};

use super::QueueHandle;

/// Owns the queue and its persisted snapshot.
///
/// Invariant: whenever the queue is non-empty, `current_index < len()`.
/// Every index-taking operation clamps or ignores out-of-range input so the
/// invariant holds after each call.
pub struct QueueManager<S: Storage> {
    tracks: Vec<Track>,
    current: usize,
    store: QueueStore<S>,
    handle: QueueHandle,
}

impl<S: Storage> QueueManager<S> {
    pub fn new(storage: S) -> Self {
        Self {
            tracks: Vec::new(),
            current: 0,
            store: QueueStore::new(storage),
            handle: Arc::new(Mutex::new(QueueSnapshot::default())),
        }
    }

    pub fn handle(&self) -> QueueHandle {
        self.handle.clone()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Meaningless while the queue is empty; use `current_track` to dereference.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            queue: self.tracks.clone(),
            current_index: self.current,
        }
    }

    /// Replace the in-memory queue with the persisted snapshot.
    ///
    /// Missing or unreadable data leaves the queue as it is. Returns whether
    /// a snapshot was applied.
    pub fn load(&mut self) -> bool {
        let Some(snapshot) = self.store.load() else {
            return false;
        };

        self.tracks = snapshot.queue;
        self.current = self.clamp(snapshot.current_index);
        if self.current != snapshot.current_index {
            warn!(
                stored = snapshot.current_index,
                len = self.tracks.len(),
                "persisted index out of range; clamped"
            );
        }
        info!(len = self.tracks.len(), current = self.current, "queue restored");
        self.publish();
        true
    }

    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        self.tracks = tracks;
        self.current = self.clamp(start_index);
        if self.current != start_index {
            warn!(start_index, len = self.tracks.len(), "start index out of range; clamped");
        }
        debug!(len = self.tracks.len(), current = self.current, "queue replaced");
        self.commit();
    }

    pub fn add_to_queue(&mut self, track: Track) {
        debug!(id = %track.id, "track appended to queue");
        self.tracks.push(track);
        self.commit();
    }

    /// Remove the entry at `index`, keeping the current track current when
    /// an earlier entry goes away. Out-of-range indices are ignored.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            warn!(index, len = self.tracks.len(), "remove ignored: index out of range");
            return None;
        }

        let removed = self.tracks.remove(index);
        if index < self.current {
            self.current -= 1;
        }
        if self.current >= self.tracks.len() {
            self.current = self.tracks.len().saturating_sub(1);
        }
        debug!(index, id = %removed.id, current = self.current, "track removed from queue");
        self.commit();
        Some(removed)
    }

    /// Swap the entry with its predecessor. No-op at the top.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.tracks.len() {
            return false;
        }
        self.swap(index - 1, index);
        true
    }

    /// Swap the entry with its successor. No-op at the bottom.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.tracks.len().saturating_sub(1) {
            return false;
        }
        self.swap(index, index + 1);
        true
    }

    /// Point at `index`, clamped into the queue.
    pub fn set_current_index(&mut self, index: usize) {
        self.current = self.clamp(index);
        if self.current != index {
            warn!(index, len = self.tracks.len(), "current index out of range; clamped");
        }
        self.commit();
    }

    /// Step forward without wrapping. Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.tracks.len() {
            return false;
        }
        self.current += 1;
        self.commit();
        true
    }

    /// Step back without wrapping. Returns whether the index moved.
    pub fn prev(&mut self) -> bool {
        if self.tracks.is_empty() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.commit();
        true
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.tracks.swap(a, b);
        if self.current == a {
            self.current = b;
        } else if self.current == b {
            self.current = a;
        }
        debug!(a, b, current = self.current, "queue entries swapped");
        self.commit();
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.tracks.len().saturating_sub(1))
    }

    fn publish(&self) {
        if let Ok(mut view) = self.handle.lock() {
            *view = self.snapshot();
        }
    }

    fn commit(&mut self) {
        self.publish();
        self.store.save(&self.snapshot());
    }
}
