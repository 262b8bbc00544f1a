use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

use crate::library::Track;

use super::engine::{AudioEngine, AudioResource, StatusSender};
use super::types::{
    AudioMode, PlaybackHandle, PlaybackInfo, PlayerMsg, SessionState, StatusEvent,
    UNKNOWN_DURATION_MILLIS,
};

/// What a status push meant for the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// Stale generation, no resource held, or not loaded yet.
    Ignored,
    Updated,
    /// The current resource just reached its end. The caller decides what
    /// plays next.
    Finished,
}

/// Owns the single live audio resource and the playback session.
///
/// Every replacement bumps `generation`; status pushes tagged with any other
/// generation are dropped, which closes the window where a late update from
/// a released resource could overwrite the new session.
pub struct PlaybackController<E: AudioEngine> {
    engine: E,
    mode: AudioMode,
    status_tx: Sender<PlayerMsg>,
    resource: Option<E::Resource>,
    generation: u64,
    info: PlaybackInfo,
    handle: PlaybackHandle,
}

impl<E: AudioEngine> PlaybackController<E> {
    pub fn new(engine: E, mode: AudioMode, status_tx: Sender<PlayerMsg>) -> Self {
        Self::with_handle(
            engine,
            mode,
            status_tx,
            Arc::new(Mutex::new(PlaybackInfo::default())),
        )
    }

    /// Build a controller that publishes into an existing `handle`.
    pub fn with_handle(
        engine: E,
        mode: AudioMode,
        status_tx: Sender<PlayerMsg>,
        handle: PlaybackHandle,
    ) -> Self {
        Self {
            engine,
            mode,
            status_tx,
            resource: None,
            generation: 0,
            info: PlaybackInfo::default(),
            handle,
        }
    }

    pub fn handle(&self) -> PlaybackHandle {
        self.handle.clone()
    }

    pub fn info(&self) -> &PlaybackInfo {
        &self.info
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    /// Load `track` on a fresh resource and start it.
    ///
    /// A track without a playable URL, or an engine that refuses the new
    /// mode, leaves the current session untouched. Returns whether a new
    /// resource is now playing.
    pub fn play_song(&mut self, track: &Track) -> bool {
        let Some(url) = track.best_audio_url().map(str::to_owned) else {
            warn!(id = %track.id, name = %track.name, "no playable audio url; ignoring");
            return false;
        };

        if let Err(e) = self.engine.configure(&self.mode) {
            error!(error = %e, "failed to configure audio engine");
            return false;
        }

        // The old stream must be gone before the new one exists.
        self.release();
        self.generation += 1;
        self.info = PlaybackInfo {
            track: Some(track.clone()),
            state: SessionState::Loading,
            generation: self.generation,
            ..PlaybackInfo::default()
        };
        self.publish();

        match self.engine.create(&url, true) {
            Ok(mut resource) => {
                resource.on_status(StatusSender::new(self.generation, self.status_tx.clone()));
                self.resource = Some(resource);
                self.info.state = SessionState::Playing;
                self.info.is_playing = true;
                info!(id = %track.id, name = %track.name, generation = self.generation, "playing");
            }
            Err(e) => {
                error!(error = %e, url = %url, "failed to load track");
                self.info = PlaybackInfo {
                    generation: self.generation,
                    ..PlaybackInfo::default()
                };
            }
        }
        self.publish();
        self.resource.is_some()
    }

    /// Pause or resume. An ended session has nothing left to resume, so its
    /// track is loaded again from the start.
    pub fn toggle_play_pause(&mut self) {
        if self.info.state == SessionState::Ended {
            self.restart_ended();
            return;
        }
        let Some(resource) = self.resource.as_mut() else {
            debug!("toggle ignored: nothing loaded");
            return;
        };

        if self.info.is_playing {
            match resource.pause() {
                Ok(()) => {
                    self.info.is_playing = false;
                    self.info.state = SessionState::Paused;
                }
                Err(e) => {
                    warn!(error = %e, "pause failed");
                    return;
                }
            }
        } else {
            match resource.play() {
                Ok(()) => {
                    self.info.is_playing = true;
                    self.info.state = SessionState::Playing;
                }
                Err(e) => {
                    warn!(error = %e, "resume failed");
                    return;
                }
            }
        }
        self.publish();
    }

    /// Release the resource and clear the session. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.resource.is_some() {
            self.release();
            self.generation += 1;
            info!("playback stopped");
        }
        self.info = PlaybackInfo {
            generation: self.generation,
            ..PlaybackInfo::default()
        };
        self.publish();
    }

    /// Seek the held resource. The reported position is updated to the
    /// requested value even past the end; the engine clamps internally.
    pub fn seek_to(&mut self, millis: u64) {
        if self.info.state == SessionState::Ended && !self.restart_ended() {
            return;
        }
        let Some(resource) = self.resource.as_mut() else {
            debug!(millis, "seek ignored: nothing loaded");
            return;
        };

        match resource.seek(millis) {
            Ok(()) => {
                self.info.position_millis = millis;
                self.publish();
            }
            Err(e) => warn!(error = %e, millis, "seek failed"),
        }
    }

    /// Apply one status push.
    pub fn handle_status(&mut self, event: StatusEvent) -> StatusOutcome {
        if event.generation != self.generation || self.resource.is_none() {
            debug!(
                event_generation = event.generation,
                generation = self.generation,
                "discarding stale status"
            );
            return StatusOutcome::Ignored;
        }

        let status = event.status;
        if !status.is_loaded {
            return StatusOutcome::Ignored;
        }

        self.info.is_playing = status.is_playing;
        self.info.position_millis = status.position_millis;
        self.info.duration_millis = status
            .duration_millis
            .filter(|d| *d > 0)
            .unwrap_or(UNKNOWN_DURATION_MILLIS);
        self.info.state = match (status.is_playing, self.info.state) {
            (true, _) => SessionState::Playing,
            (false, state @ (SessionState::Loading | SessionState::Ended)) => state,
            (false, _) => SessionState::Paused,
        };
        self.publish();

        if status.did_just_finish {
            debug!(generation = self.generation, "track finished");
            StatusOutcome::Finished
        } else {
            StatusOutcome::Updated
        }
    }

    /// Nothing follows the finished track: stop reporting playback but keep
    /// the session (and its last frame) around.
    pub fn mark_ended(&mut self) {
        if self.resource.is_none() {
            return;
        }
        self.info.is_playing = false;
        self.info.state = SessionState::Ended;
        self.publish();
    }

    /// The drained resource of an ended session cannot play again; replace
    /// it with a fresh one for the same track.
    fn restart_ended(&mut self) -> bool {
        let Some(track) = self.info.track.clone() else {
            return false;
        };
        debug!(id = %track.id, "restarting ended track");
        self.play_song(&track)
    }

    /// Release the resource on teardown.
    pub fn shutdown(&mut self) {
        if self.resource.is_some() {
            self.stop();
        }
    }

    /// Engine-level stop then unload. Both are always attempted.
    fn release(&mut self) {
        let Some(mut resource) = self.resource.take() else {
            return;
        };
        if let Err(e) = resource.stop() {
            warn!(error = %e, "failed to stop audio resource");
        }
        if let Err(e) = resource.unload() {
            warn!(error = %e, "failed to unload audio resource");
        }
        debug!(generation = self.generation, "audio resource released");
    }

    fn publish(&self) {
        if let Ok(mut info) = self.handle.lock() {
            *info = self.info.clone();
        }
    }
}

impl<E: AudioEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        self.release();
    }
}
