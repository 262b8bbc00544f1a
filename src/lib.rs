//! Playback and queue coordination engine.
//!
//! A persistent, reorderable play queue and a single-resource playback
//! controller, driven from one player thread so queue edits, playback
//! commands and audio status updates never interleave.

pub mod audio;
pub mod config;
pub mod library;
pub mod queue;
pub mod runtime;
pub mod store;
