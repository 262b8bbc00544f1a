//! The audio engine capability the controller drives.
//!
//! An engine turns a URL into a resource; a resource plays, pauses, seeks
//! and pushes `EngineStatus` updates to the one subscriber it was given.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use thiserror::Error;

use super::types::{AudioMode, EngineStatus, PlayerMsg, StatusEvent};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported audio url {0:?}")]
    UnsupportedUrl(String),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("audio output unavailable: {0}")]
    Output(String),
    #[error("failed to spawn player thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("player thread exited during startup")]
    StartupAborted,
    #[error("seek failed: {0}")]
    Seek(String),
    #[error("{0}")]
    Rejected(String),
}

/// Subscription handed to a resource. Every status it pushes carries the
/// generation of the session that created the resource, so the controller
/// can drop pushes from resources it already replaced.
#[derive(Debug, Clone)]
pub struct StatusSender {
    generation: u64,
    tx: Sender<PlayerMsg>,
}

impl StatusSender {
    pub fn new(generation: u64, tx: Sender<PlayerMsg>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `false` once the player is gone; the resource should stop
    /// pushing at that point.
    pub fn send(&self, status: EngineStatus) -> bool {
        self.tx
            .send(PlayerMsg::Status(StatusEvent {
                generation: self.generation,
                status,
            }))
            .is_ok()
    }
}

/// A loaded audio stream. Exactly one is held by the controller at a time.
pub trait AudioResource {
    fn play(&mut self) -> Result<(), EngineError>;
    fn pause(&mut self) -> Result<(), EngineError>;
    fn stop(&mut self) -> Result<(), EngineError>;
    /// Free the underlying stream and end the status subscription.
    fn unload(&mut self) -> Result<(), EngineError>;
    /// The engine clamps out-of-range positions itself.
    fn seek(&mut self, millis: u64) -> Result<(), EngineError>;
    /// Start pushing status updates to `status`, replacing any previous
    /// subscriber.
    fn on_status(&mut self, status: StatusSender);
}

pub trait AudioEngine {
    type Resource: AudioResource;

    fn configure(&mut self, mode: &AudioMode) -> Result<(), EngineError>;
    fn create(&mut self, url: &str, autoplay: bool) -> Result<Self::Resource, EngineError>;
}
