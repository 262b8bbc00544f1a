use tracing::{debug, info, warn};

use crate::queue::QueueManager;
use crate::store::Storage;

use super::controller::{PlaybackController, StatusOutcome};
use super::engine::AudioEngine;
use super::types::{PlayerCmd, PlayerMsg, PlayerSnapshot, StatusEvent};

/// Routes player messages to the Queue Manager and the Playback Controller.
///
/// Neither component calls the other: when the controller reports a
/// finished track, the core asks the queue what follows and hands that track
/// back to the controller.
pub struct PlayerCore<E: AudioEngine, S: Storage> {
    queue: QueueManager<S>,
    playback: PlaybackController<E>,
}

impl<E: AudioEngine, S: Storage> PlayerCore<E, S> {
    pub fn new(queue: QueueManager<S>, playback: PlaybackController<E>) -> Self {
        Self { queue, playback }
    }

    pub fn queue(&self) -> &QueueManager<S> {
        &self.queue
    }

    pub fn playback(&self) -> &PlaybackController<E> {
        &self.playback
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            queue: self.queue.snapshot(),
            playback: self.playback.info().clone(),
        }
    }

    /// Handle one message. Returns `false` when the player should shut down.
    pub fn handle(&mut self, msg: PlayerMsg) -> bool {
        match msg {
            PlayerMsg::Status(event) => {
                self.on_status(event);
                true
            }
            PlayerMsg::Cmd(cmd) => self.execute(cmd),
        }
    }

    fn execute(&mut self, cmd: PlayerCmd) -> bool {
        match cmd {
            PlayerCmd::LoadQueue => {
                self.queue.load();
            }
            PlayerCmd::SetQueue {
                tracks,
                start_index,
            } => self.queue.set_queue(tracks, start_index),
            PlayerCmd::AddToQueue(track) => self.queue.add_to_queue(track),
            PlayerCmd::RemoveFromQueue(index) => {
                self.queue.remove_from_queue(index);
            }
            PlayerCmd::MoveUp(index) => {
                self.queue.move_up(index);
            }
            PlayerCmd::MoveDown(index) => {
                self.queue.move_down(index);
            }
            PlayerCmd::SetCurrentIndex(index) => self.queue.set_current_index(index),
            PlayerCmd::Next => {
                self.queue.next();
            }
            PlayerCmd::Prev => {
                self.queue.prev();
            }

            PlayerCmd::PlaySong(track) => {
                self.playback.play_song(&track);
            }
            PlayerCmd::TogglePlayPause => self.playback.toggle_play_pause(),
            PlayerCmd::Stop => self.playback.stop(),
            PlayerCmd::SeekTo(millis) => self.playback.seek_to(millis),

            PlayerCmd::PlayList {
                tracks,
                start_index,
            } => {
                self.queue.set_queue(tracks, start_index);
                self.play_current();
            }
            PlayerCmd::PlayAt(index) => {
                if index >= self.queue.len() {
                    warn!(index, len = self.queue.len(), "play ignored: index out of range");
                } else {
                    self.queue.set_current_index(index);
                    self.play_current();
                }
            }
            PlayerCmd::SkipNext => {
                if self.queue.next() {
                    self.play_current();
                }
            }
            PlayerCmd::SkipPrevious => {
                if self.queue.prev() {
                    self.play_current();
                }
            }

            PlayerCmd::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            PlayerCmd::Quit => {
                self.playback.shutdown();
                return false;
            }
        }
        true
    }

    fn on_status(&mut self, event: StatusEvent) {
        if self.playback.handle_status(event) == StatusOutcome::Finished {
            self.autoplay_next();
        }
    }

    /// Chain into the entry after the current one, or end the session.
    fn autoplay_next(&mut self) {
        let next_index = self.queue.current_index() + 1;
        let Some(track) = self.queue.get(next_index).cloned() else {
            info!(index = self.queue.current_index(), "end of queue");
            self.playback.mark_ended();
            return;
        };

        self.queue.set_current_index(next_index);
        debug!(index = next_index, id = %track.id, "autoplay advancing");
        if !self.playback.play_song(&track) {
            self.playback.mark_ended();
        }
    }

    fn play_current(&mut self) {
        match self.queue.current_track().cloned() {
            Some(track) => {
                self.playback.play_song(&track);
            }
            None => debug!("nothing to play: queue is empty"),
        }
    }
}
