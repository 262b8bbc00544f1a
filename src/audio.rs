//! Playback side of the engine.
//!
//! A single player thread owns the Queue Manager and the Playback Controller
//! and consumes one message channel carrying both user commands and audio
//! status events, so every step runs to completion before the next begins.
//! `Player` is the handle UI code talks to.

mod controller;
mod coordinator;
mod engine;
mod player;
mod sink;
mod thread;
mod types;

pub use controller::{PlaybackController, StatusOutcome};
pub use coordinator::PlayerCore;
pub use engine::{AudioEngine, AudioResource, EngineError, StatusSender};
pub use player::Player;
pub use sink::{RodioEngine, RodioResource};
pub use types::*;

#[cfg(test)]
pub(crate) mod testing;
