//! Core types for playback management

use serde::{Deserialize, Serialize};
use vibra_core::types::Track;

/// Engine state
///
/// `Ended` is a transient state: natural completion passes through it on the
/// way to the next track (or to `Idle` when the queue is exhausted under
/// repeat-off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No track loaded
    Idle,

    /// Media is loading; transport commands are held off until the device
    /// reports ready
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Track finished naturally
    Ended,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the queue ends
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

/// Snapshot of the player for UI rendering
///
/// `current_track` is a denormalized copy taken at selection time, not a
/// live reference into the catalog: later catalog mutations never show
/// through until the next track change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Denormalized copy of the playing track, if any
    pub current_track: Option<Track>,

    /// Whether audio is currently audible
    pub is_playing: bool,

    /// Playback position in seconds
    pub position_secs: f64,

    /// Track duration in seconds
    pub duration_secs: f64,

    /// Volume in [0, 1]
    pub volume: f64,

    /// Whether shuffle is enabled
    pub is_shuffling: bool,

    /// Current repeat mode
    pub repeat: RepeatMode,
}

/// Configuration for the playback engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume in [0, 1] (default: 1.0)
    pub volume: f64,

    /// Initial shuffle state (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}
