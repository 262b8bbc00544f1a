//! Queue Manager: the ordered play queue and its current-track pointer.
//!
//! The queue is the only source of truth for "what plays next". Every
//! mutation republishes the queue to its shared handle and writes the whole
//! snapshot to the persistence store before returning.

mod manager;

use std::sync::{Arc, Mutex};

pub use manager::QueueManager;

use crate::store::QueueSnapshot;

/// Read-only view of the queue shared with UI readers.
pub type QueueHandle = Arc<Mutex<QueueSnapshot>>;

#[cfg(test)]
mod tests;
