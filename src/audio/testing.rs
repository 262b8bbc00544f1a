//! Scripted audio engine for tests.
//!
//! Every engine and resource call is appended to a shared log as a short
//! string (`"create:<url>#<n>"`, `"stop#<n>"`, ...) so tests can assert exact
//! ordering. Status subscriptions are kept so tests can push statuses as if
//! the resource emitted them.

use std::sync::{Arc, Mutex};

use super::engine::{AudioEngine, AudioResource, EngineError, StatusSender};
use super::types::{AudioMode, EngineStatus};

#[derive(Debug, Default)]
pub(crate) struct ProbeState {
    pub calls: Vec<String>,
    pub modes: Vec<AudioMode>,
    /// Subscriber of each created resource, indexed by resource id - 1.
    pub subscribers: Vec<Option<StatusSender>>,
    pub fail_configure: bool,
    pub fail_create: bool,
    pub fail_play: bool,
    pub fail_pause: bool,
    pub fail_seek: bool,
    pub fail_stop: bool,
}

/// Shared view into a `ScriptedEngine` after it moved into a controller.
#[derive(Debug, Clone, Default)]
pub(crate) struct Probe(Arc<Mutex<ProbeState>>);

impl Probe {
    pub fn with<R>(&self, f: impl FnOnce(&mut ProbeState) -> R) -> R {
        let mut state = self.0.lock().unwrap_or_else(|p| p.into_inner());
        f(&mut state)
    }

    pub fn calls(&self) -> Vec<String> {
        self.with(|s| s.calls.clone())
    }

    pub fn clear_calls(&self) {
        self.with(|s| s.calls.clear());
    }

    pub fn created(&self) -> usize {
        self.with(|s| s.subscribers.len())
    }

    /// Push `status` from resource `id` (1-based) as its emitter would.
    pub fn emit(&self, id: usize, status: EngineStatus) -> bool {
        let sender = self.with(|s| s.subscribers.get(id - 1).cloned().flatten());
        sender.map(|tx| tx.send(status)).unwrap_or(false)
    }

    pub fn emit_finished(&self, id: usize) -> bool {
        self.emit(id, finished(180_000))
    }
}

pub(crate) fn playing(position_millis: u64, duration_millis: Option<u64>) -> EngineStatus {
    EngineStatus {
        is_loaded: true,
        is_playing: true,
        position_millis,
        duration_millis,
        did_just_finish: false,
    }
}

pub(crate) fn finished(duration_millis: u64) -> EngineStatus {
    EngineStatus {
        is_loaded: true,
        is_playing: false,
        position_millis: duration_millis,
        duration_millis: Some(duration_millis),
        did_just_finish: true,
    }
}

pub(crate) struct ScriptedEngine {
    probe: Probe,
}

impl ScriptedEngine {
    pub fn new() -> (Self, Probe) {
        let probe = Probe::default();
        (
            Self {
                probe: probe.clone(),
            },
            probe,
        )
    }
}

pub(crate) struct ScriptedResource {
    id: usize,
    probe: Probe,
}

impl ScriptedResource {
    fn call(&self, what: &str, fail: impl FnOnce(&ProbeState) -> bool) -> Result<(), EngineError> {
        let id = self.id;
        self.probe.with(|s| {
            s.calls.push(format!("{what}#{id}"));
            if fail(s) {
                Err(EngineError::Rejected(format!("{what} refused")))
            } else {
                Ok(())
            }
        })
    }
}

impl AudioEngine for ScriptedEngine {
    type Resource = ScriptedResource;

    fn configure(&mut self, mode: &AudioMode) -> Result<(), EngineError> {
        self.probe.with(|s| {
            s.calls.push("configure".to_string());
            s.modes.push(*mode);
            if s.fail_configure {
                Err(EngineError::Rejected("configure refused".into()))
            } else {
                Ok(())
            }
        })
    }

    fn create(&mut self, url: &str, autoplay: bool) -> Result<ScriptedResource, EngineError> {
        self.probe.with(|s| {
            if s.fail_create {
                s.calls.push(format!("create-failed:{url}"));
                return Err(EngineError::UnsupportedUrl(url.to_string()));
            }
            s.subscribers.push(None);
            let id = s.subscribers.len();
            let tag = if autoplay { "create" } else { "create-paused" };
            s.calls.push(format!("{tag}:{url}#{id}"));
            Ok(ScriptedResource {
                id,
                probe: self.probe.clone(),
            })
        })
    }
}

impl AudioResource for ScriptedResource {
    fn play(&mut self) -> Result<(), EngineError> {
        self.call("play", |s| s.fail_play)
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.call("pause", |s| s.fail_pause)
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.call("stop", |s| s.fail_stop)
    }

    fn unload(&mut self) -> Result<(), EngineError> {
        let id = self.id;
        self.probe.with(|s| {
            s.calls.push(format!("unload#{id}"));
            if let Some(slot) = s.subscribers.get_mut(id - 1) {
                *slot = None;
            }
        });
        Ok(())
    }

    fn seek(&mut self, millis: u64) -> Result<(), EngineError> {
        self.call(&format!("seek:{millis}"), |s| s.fail_seek)
    }

    fn on_status(&mut self, status: StatusSender) {
        let id = self.id;
        self.probe.with(|s| {
            s.calls.push(format!("subscribe#{id}"));
            if let Some(slot) = s.subscribers.get_mut(id - 1) {
                *slot = Some(status);
            }
        });
    }
}
