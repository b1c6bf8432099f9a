/// Track domain type
use crate::types::{ArtistId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A streamable track.
///
/// Owned by the Track Catalog Service; the playback core consumes it
/// read-only. The playback engine copies a `Track` into its own state when a
/// track is selected, so later catalog mutations never show through into an
/// in-progress playback session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist identifier
    pub artist_id: ArtistId,

    /// Artist display name
    pub artist_name: String,

    /// Album name
    pub album: Option<String>,

    /// Genre
    pub genre: Option<String>,

    /// Release year
    pub year: Option<u32>,

    /// Track duration in seconds
    pub duration_secs: u32,

    /// Streaming URL for the audio media
    pub media_url: String,

    /// URL for the cover image
    pub cover_url: String,

    /// Number of recorded listens; mutated only by the session recorder
    /// backend
    pub play_count: u64,

    /// Whether the requesting user has favorited this track; mutated only
    /// through the favorites collaborator
    pub is_liked: bool,

    /// When the track was added to the catalog
    pub created_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        title: impl Into<String>,
        artist_id: ArtistId,
        artist_name: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist_id,
            artist_name: artist_name.into(),
            album: None,
            genre: None,
            year: None,
            duration_secs: 0,
            media_url: String::new(),
            cover_url: String::new(),
            play_count: 0,
            is_liked: false,
            created_at: Utc::now(),
        }
    }

    /// Get the track duration as a `Duration`
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    /// Set the track duration from a `Duration`
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs() as u32;
    }
}
