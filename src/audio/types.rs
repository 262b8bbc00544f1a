//! Audio-related small types and handles.
//!
//! This module defines the engine mode, typed status events, the playback
//! session snapshot shared with the UI, and the player message set.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::config::AudioSettings;
use crate::library::Track;
use crate::store::QueueSnapshot;

/// Duration reported before the engine knows the real one. Non-zero so
/// `position / duration` stays finite.
pub const UNKNOWN_DURATION_MILLIS: u64 = 1;

/// Session-wide engine configuration applied before each load.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AudioMode {
    pub continuous_background_playback: bool,
    pub duck_other_audio: bool,
    pub route_through_earpiece: bool,
}

impl Default for AudioMode {
    fn default() -> Self {
        Self {
            continuous_background_playback: true,
            duck_other_audio: true,
            route_through_earpiece: false,
        }
    }
}

impl From<&AudioSettings> for AudioMode {
    fn from(s: &AudioSettings) -> Self {
        Self {
            continuous_background_playback: s.continuous_background_playback,
            duck_other_audio: s.duck_other_audio,
            route_through_earpiece: s.route_through_earpiece,
        }
    }
}

/// One status push from an audio resource.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EngineStatus {
    pub is_loaded: bool,
    pub is_playing: bool,
    pub position_millis: u64,
    pub duration_millis: Option<u64>,
    /// True exactly once, on the update where the resource reached its end.
    pub did_just_finish: bool,
}

/// A status push tagged with the session generation it belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub generation: u64,
    pub status: EngineStatus,
}

/// Lifecycle of the playback session.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No resource held.
    #[default]
    Empty,
    /// A resource is being created for `track`.
    Loading,
    Playing,
    Paused,
    /// The last track finished and nothing followed it. The resource is
    /// still held so the final position stays visible.
    Ended,
}

#[derive(Debug, Clone)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Track the live resource was created for.
    pub track: Option<Track>,
    pub state: SessionState,
    pub is_playing: bool,
    pub position_millis: u64,
    pub duration_millis: u64,
    /// Generation of the session this snapshot describes.
    pub generation: u64,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            track: None,
            state: SessionState::Empty,
            is_playing: false,
            position_millis: 0,
            duration_millis: UNKNOWN_DURATION_MILLIS,
            generation: 0,
        }
    }
}

impl PlaybackInfo {
    /// Playback progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let duration = self.duration_millis.max(UNKNOWN_DURATION_MILLIS) as f64;
        (self.position_millis as f64 / duration).clamp(0.0, 1.0)
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Queue and session observed at the same point in the command stream.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub queue: QueueSnapshot,
    pub playback: PlaybackInfo,
}

#[derive(Debug)]
pub enum PlayerCmd {
    /// Restore the queue from the persistence store.
    LoadQueue,
    /// Replace the queue and point at `start_index`.
    SetQueue { tracks: Vec<Track>, start_index: usize },
    AddToQueue(Track),
    RemoveFromQueue(usize),
    MoveUp(usize),
    MoveDown(usize),
    SetCurrentIndex(usize),
    /// Move the queue pointer forward without starting playback.
    Next,
    /// Move the queue pointer back without starting playback.
    Prev,

    /// Start playing `track` on a fresh resource.
    PlaySong(Track),
    TogglePlayPause,
    Stop,
    SeekTo(u64),

    /// Replace the queue and play the entry at `start_index`.
    PlayList { tracks: Vec<Track>, start_index: usize },
    /// Point at queue entry `index` and play it.
    PlayAt(usize),
    /// Advance the queue and play the new current track.
    SkipNext,
    /// Step back in the queue and play the new current track.
    SkipPrevious,

    /// Reply with the state after every earlier message was handled.
    Snapshot(Sender<PlayerSnapshot>),
    /// Release the audio resource and end the player thread.
    Quit,
}

#[derive(Debug)]
pub enum PlayerMsg {
    Cmd(PlayerCmd),
    Status(StatusEvent),
}
