//! Wire types for the Vibra backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vibra_core::types::{ArtistId, Track, TrackId, UserId};

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL (e.g. `https://music.example.com`)
    pub base_url: String,

    /// Bearer token from the identity provider, if signed in
    pub auth_token: Option<String>,

    /// Stable user id from the identity provider
    ///
    /// Absent for guest sessions: browsing and playback keep working, but
    /// listen recording and like persistence are disabled.
    pub user_id: Option<UserId>,
}

impl ApiConfig {
    /// Create an anonymous configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            user_id: None,
        }
    }

    /// Attach an identity to the configuration.
    pub fn with_identity(
        mut self,
        user_id: UserId,
        auth_token: impl Into<String>,
    ) -> Self {
        self.user_id = Some(user_id);
        self.auth_token = Some(auth_token.into());
        self
    }
}

/// Track representation on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTrack {
    pub id: String,
    pub title: String,
    pub artist_id: String,
    pub artist_name: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    pub duration_secs: u32,
    pub media_url: String,
    pub cover_url: String,
    #[serde(default)]
    pub play_count: u64,
    #[serde(default)]
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ApiTrack> for Track {
    fn from(api: ApiTrack) -> Self {
        Track {
            id: TrackId::new(api.id),
            title: api.title,
            artist_id: ArtistId::new(api.artist_id),
            artist_name: api.artist_name,
            album: api.album,
            genre: api.genre,
            year: api.year,
            duration_secs: api.duration_secs,
            media_url: api.media_url,
            cover_url: api.cover_url,
            play_count: api.play_count,
            is_liked: api.is_liked,
            created_at: api.created_at,
        }
    }
}

/// Payload posted to the listens endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenPayload {
    pub user_id: UserId,
    pub track_id: TrackId,
    pub completed_percentage: u8,
}

/// Local notification broadcast after a listen is recorded.
///
/// Lets on-screen widgets (recently played, play counts) refresh without
/// polling the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenNotice {
    pub track_id: TrackId,
    pub user_id: UserId,
}
