//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The audio device rejected a command
    #[error("Audio device error: {0}")]
    Device(String),

    /// Media failed to load (unreachable locator, unsupported format)
    #[error("Failed to load media for track {track_id}: {reason}")]
    LoadFailed {
        /// Track whose media could not be loaded
        track_id: vibra_core::TrackId,
        /// Device-reported reason
        reason: String,
    },

    /// Queue population failed; the previous queue stays authoritative
    #[error("Queue population failed: {0}")]
    Population(#[source] vibra_core::VibraError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
