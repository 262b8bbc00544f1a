use std::sync::mpsc::{self, SendError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::library::Track;
use crate::queue::{QueueHandle, QueueManager};
use crate::store::Storage;

use super::engine::{AudioEngine, EngineError};
use super::thread::spawn_player_thread;
use super::types::{AudioMode, PlaybackHandle, PlaybackInfo, PlayerCmd, PlayerMsg, PlayerSnapshot};

/// Handle to the player thread.
///
/// Every method only enqueues a command and returns; commands run in the
/// order they were sent. Failures inside the player are logged there and
/// never reach the caller.
pub struct Player {
    tx: Sender<PlayerMsg>,
    playback: PlaybackHandle,
    queue: QueueHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    /// Start the player thread with an engine built by `make_engine` on that
    /// thread and a queue persisted in `storage`.
    pub fn spawn<E, S, F>(
        make_engine: F,
        storage: S,
        audio_settings: &AudioSettings,
    ) -> Result<Self, EngineError>
    where
        E: AudioEngine + 'static,
        S: Storage + 'static,
        F: FnOnce() -> Result<E, EngineError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<PlayerMsg>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let queue_manager = QueueManager::new(storage);
        let queue = queue_manager.handle();

        let join = spawn_player_thread(
            make_engine,
            queue_manager,
            AudioMode::from(audio_settings),
            playback.clone(),
            tx.clone(),
            rx,
            ready_tx,
        )
        .map_err(EngineError::Spawn)?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = join.join();
                return Err(e);
            }
            Err(_) => {
                let _ = join.join();
                return Err(EngineError::StartupAborted);
            }
        }

        Ok(Self {
            tx,
            playback,
            queue,
            join: Mutex::new(Some(join)),
        })
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn queue_handle(&self) -> QueueHandle {
        self.queue.clone()
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), SendError<PlayerMsg>> {
        self.tx.send(PlayerMsg::Cmd(cmd))
    }

    fn dispatch(&self, cmd: PlayerCmd) {
        if let Err(SendError(msg)) = self.send(cmd) {
            warn!(?msg, "player thread is gone; command dropped");
        }
    }

    pub fn load_queue(&self) {
        self.dispatch(PlayerCmd::LoadQueue);
    }

    pub fn set_queue(&self, tracks: Vec<Track>, start_index: usize) {
        self.dispatch(PlayerCmd::SetQueue {
            tracks,
            start_index,
        });
    }

    pub fn add_to_queue(&self, track: Track) {
        self.dispatch(PlayerCmd::AddToQueue(track));
    }

    pub fn remove_from_queue(&self, index: usize) {
        self.dispatch(PlayerCmd::RemoveFromQueue(index));
    }

    pub fn move_up(&self, index: usize) {
        self.dispatch(PlayerCmd::MoveUp(index));
    }

    pub fn move_down(&self, index: usize) {
        self.dispatch(PlayerCmd::MoveDown(index));
    }

    pub fn set_current_index(&self, index: usize) {
        self.dispatch(PlayerCmd::SetCurrentIndex(index));
    }

    pub fn next(&self) {
        self.dispatch(PlayerCmd::Next);
    }

    pub fn prev(&self) {
        self.dispatch(PlayerCmd::Prev);
    }

    pub fn play_song(&self, track: Track) {
        self.dispatch(PlayerCmd::PlaySong(track));
    }

    pub fn toggle_play_pause(&self) {
        self.dispatch(PlayerCmd::TogglePlayPause);
    }

    pub fn stop(&self) {
        self.dispatch(PlayerCmd::Stop);
    }

    pub fn seek_to(&self, millis: u64) {
        self.dispatch(PlayerCmd::SeekTo(millis));
    }

    pub fn play_list(&self, tracks: Vec<Track>, start_index: usize) {
        self.dispatch(PlayerCmd::PlayList {
            tracks,
            start_index,
        });
    }

    pub fn play_at(&self, index: usize) {
        self.dispatch(PlayerCmd::PlayAt(index));
    }

    pub fn skip_next(&self) {
        self.dispatch(PlayerCmd::SkipNext);
    }

    pub fn skip_previous(&self) {
        self.dispatch(PlayerCmd::SkipPrevious);
    }

    /// Wait for every earlier command to finish and return the resulting
    /// state. `None` once the player thread has exited.
    pub fn snapshot(&self) -> Option<PlayerSnapshot> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(PlayerCmd::Snapshot(reply_tx)).ok()?;
        reply_rx.recv().ok()
    }

    /// Release audio and join the player thread.
    pub fn quit(&self) {
        let _ = self.send(PlayerCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
                debug!("player joined");
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.quit();
    }
}
