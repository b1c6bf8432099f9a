//! Playback events
//!
//! Event-based communication for UI synchronization. The engine accumulates
//! events as transitions happen; the host drains them with
//! [`PlaybackEngine::take_events`] after each command or device callback.
//!
//! [`PlaybackEngine::take_events`]: crate::PlaybackEngine::take_events

use crate::types::EngineState;
use serde::{Deserialize, Serialize};
use vibra_core::types::TrackId;

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Engine state changed
    StateChanged {
        /// The new engine state
        state: EngineState,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Track finished playing naturally (position reached duration)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Position update (forwarded from the device)
    PositionUpdate {
        /// Current playback position in seconds
        position_secs: f64,
        /// Track duration in seconds
        duration_secs: f64,
    },

    /// Volume or mute state changed
    VolumeChanged {
        /// Requested volume level in [0, 1]
        volume: f64,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// The queue was replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Playback could not start because the autoplay gate is still locked;
    /// the shell should surface a "tap to play" prompt
    AutoplayBlocked {
        /// Track that is loaded and waiting
        track_id: TrackId,
    },

    /// The queue finished a full pass with repeat off
    QueueExhausted,

    /// A user-visible failure (media load, queue population)
    Error {
        /// Error message
        message: String,
    },
}
