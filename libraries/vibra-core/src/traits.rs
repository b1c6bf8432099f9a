/// Service traits for Vibra Player
use crate::error::Result;
use crate::types::{Track, TrackId, UserId};
use async_trait::async_trait;

/// Query filter for catalog listings.
///
/// All fields are optional; an empty filter lists the full catalog in the
/// service's canonical order (descending play count, then descending
/// creation time).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Free-text search over title, artist, and album
    pub search: Option<String>,

    /// Restrict to a single artist
    pub artist_id: Option<crate::types::ArtistId>,

    /// Restrict to a single genre
    pub genre: Option<String>,

    /// Maximum number of results
    pub limit: Option<u32>,
}

impl CatalogFilter {
    /// Check if the filter restricts anything
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.artist_id.is_none()
            && self.genre.is_none()
            && self.limit.is_none()
    }
}

/// Track catalog service
///
/// The catalog owns persistence and ordering; the playback core treats
/// responses as already-ordered lists and never mutates catalog state.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// List tracks matching a filter, in the service's canonical order
    async fn list_tracks(&self, filter: &CatalogFilter) -> Result<Vec<Track>>;

    /// Get a single track by ID
    async fn get_track(&self, id: &TrackId) -> Result<Track>;

    /// List tracks related to the given one (shared artist or genre),
    /// ranked by descending play count
    async fn list_related(&self, id: &TrackId) -> Result<Vec<Track>>;
}

/// Favorites collaborator
///
/// Called by UI layers; the playback engine only holds the optimistic
/// `is_liked` boolean and never reaches the network itself.
#[async_trait]
pub trait Favorites: Send + Sync {
    /// Mark a track as liked for a user
    async fn like(&self, user_id: &UserId, track_id: &TrackId) -> Result<()>;

    /// Remove a track from a user's likes
    async fn unlike(&self, user_id: &UserId, track_id: &TrackId) -> Result<()>;
}

/// Playback session recorder
///
/// Best-effort listen reporting. Implementations must return without
/// blocking: failures are logged and swallowed, never retried, and never
/// surfaced to the playback engine.
pub trait SessionRecorder: Send + Sync {
    /// Report that `completed_percentage` (0-100) of a track had played when
    /// the event was emitted. Fire-and-forget.
    fn record(&self, track_id: &TrackId, completed_percentage: u8);
}

/// A recorder that drops every event.
///
/// Stands in when no recorder backend is configured (e.g. anonymous
/// sessions, unit tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl SessionRecorder for NoopRecorder {
    fn record(&self, _track_id: &TrackId, _completed_percentage: u8) {}
}
