//! Audio engine over `rodio`: one `Sink` per resource on the default
//! output device.
//!
//! Each resource runs a small emitter thread that pushes its status at a
//! fixed interval and once more when the sink drains.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use super::engine::{AudioEngine, AudioResource, EngineError, StatusSender};
use super::types::{AudioMode, EngineStatus};

/// Map a track URL to a local path. Only `file://` URLs and bare paths are
/// playable; streaming over the network is not supported.
pub(crate) fn path_from_url(url: &str) -> Result<PathBuf, EngineError> {
    let url = url.trim();
    if let Some(rest) = url.strip_prefix("file://") {
        return Ok(PathBuf::from(rest));
    }
    if url.is_empty() || url.contains("://") {
        return Err(EngineError::UnsupportedUrl(url.to_string()));
    }
    Ok(PathBuf::from(url))
}

pub struct RodioEngine {
    stream: OutputStream,
    mode: Option<AudioMode>,
    status_interval: Duration,
}

impl RodioEngine {
    pub fn open_default(status_interval: Duration) -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            mode: None,
            status_interval: status_interval.max(Duration::from_millis(1)),
        })
    }
}

impl AudioEngine for RodioEngine {
    type Resource = RodioResource;

    fn configure(&mut self, mode: &AudioMode) -> Result<(), EngineError> {
        // Desktop output has no focus/ducking/earpiece routing; only changes
        // are logged.
        if self.mode != Some(*mode) {
            debug!(?mode, "audio mode configured");
            self.mode = Some(*mode);
        }
        Ok(())
    }

    fn create(&mut self, url: &str, autoplay: bool) -> Result<RodioResource, EngineError> {
        let path = path_from_url(url)?;
        let file = File::open(&path).map_err(|source| EngineError::Open {
            path: path.clone(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let duration = source.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        if autoplay {
            sink.play();
        } else {
            sink.pause();
        }
        debug!(path = %path.display(), ?duration, "audio resource created");

        Ok(RodioResource {
            sink: Arc::new(sink),
            duration,
            interval: self.status_interval,
            emitter_stop: None,
        })
    }
}

pub struct RodioResource {
    sink: Arc<Sink>,
    duration: Option<Duration>,
    interval: Duration,
    emitter_stop: Option<Arc<AtomicBool>>,
}

impl RodioResource {
    fn stop_emitter(&mut self) {
        if let Some(stop) = self.emitter_stop.take() {
            stop.store(true, Ordering::Release);
        }
    }
}

fn current_status(sink: &Sink, duration: Option<Duration>, did_just_finish: bool) -> EngineStatus {
    EngineStatus {
        is_loaded: true,
        is_playing: !sink.is_paused() && !sink.empty(),
        position_millis: sink.get_pos().as_millis() as u64,
        duration_millis: duration.map(|d| d.as_millis() as u64),
        did_just_finish,
    }
}

impl AudioResource for RodioResource {
    fn play(&mut self) -> Result<(), EngineError> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.sink.pause();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.sink.stop();
        Ok(())
    }

    fn unload(&mut self) -> Result<(), EngineError> {
        self.stop_emitter();
        self.sink.clear();
        Ok(())
    }

    fn seek(&mut self, millis: u64) -> Result<(), EngineError> {
        self.sink
            .try_seek(Duration::from_millis(millis))
            .map_err(|e| EngineError::Seek(e.to_string()))
    }

    fn on_status(&mut self, status: StatusSender) {
        self.stop_emitter();

        let stop = Arc::new(AtomicBool::new(false));
        self.emitter_stop = Some(stop.clone());

        let sink = self.sink.clone();
        let duration = self.duration;
        let interval = self.interval;
        let spawned = thread::Builder::new()
            .name(format!("segue-status-{}", status.generation()))
            .spawn(move || {
                while !stop.load(Ordering::Acquire) {
                    let drained = sink.empty();
                    if !status.send(current_status(&sink, duration, drained)) || drained {
                        break;
                    }
                    thread::sleep(interval);
                }
            });
        if let Err(e) = spawned {
            warn!(error = %e, "failed to start status emitter");
        }
    }
}

impl Drop for RodioResource {
    fn drop(&mut self) {
        self.stop_emitter();
    }
}
