use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::queue::QueueManager;
use crate::store::Storage;

use super::controller::PlaybackController;
use super::coordinator::PlayerCore;
use super::engine::{AudioEngine, EngineError};
use super::types::{AudioMode, PlaybackHandle, PlayerMsg};

/// Spawn the player thread.
///
/// The engine is built on the thread itself: output streams are not always
/// `Send`. `ready` receives the outcome of building it before any message is
/// processed.
pub(super) fn spawn_player_thread<E, S, F>(
    make_engine: F,
    queue: QueueManager<S>,
    mode: AudioMode,
    playback: PlaybackHandle,
    tx: Sender<PlayerMsg>,
    rx: Receiver<PlayerMsg>,
    ready: Sender<Result<(), EngineError>>,
) -> std::io::Result<JoinHandle<()>>
where
    E: AudioEngine + 'static,
    S: Storage + 'static,
    F: FnOnce() -> Result<E, EngineError> + Send + 'static,
{
    thread::Builder::new()
        .name("segue-player".into())
        .spawn(move || {
            let engine = match make_engine() {
                Ok(engine) => engine,
                Err(e) => {
                    error!(error = %e, "audio engine unavailable");
                    let _ = ready.send(Err(e));
                    return;
                }
            };
            let _ = ready.send(Ok(()));

            let controller = PlaybackController::with_handle(engine, mode, tx, playback);
            let mut core = PlayerCore::new(queue, controller);

            // The controller keeps a sender for status subscriptions, so the
            // channel only closes on Quit.
            while let Ok(msg) = rx.recv() {
                if !core.handle(msg) {
                    break;
                }
            }
            debug!("player thread exiting");
        })
}
