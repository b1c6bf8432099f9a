//! Queue sources
//!
//! Strategies that translate a browsing context into an ordered track list
//! for the queue. Population is always asynchronous and read-only against
//! the catalog; the engine swaps the queue in only once population
//! completes, so a failed population leaves the previous queue playing.

use async_trait::async_trait;
use tracing::debug;
use vibra_core::traits::{CatalogFilter, TrackCatalog};
use vibra_core::types::{Track, TrackId};

use crate::error::{PlaybackError, Result};

/// How many related tracks the default rail shows
const RELATED_RAIL_CAP: usize = 5;

/// A populated queue ready to hand to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct QueuePlan {
    /// Tracks in playback order
    pub tracks: Vec<Track>,

    /// Index to start playing from
    pub start_index: usize,
}

/// Strategy that populates the queue from a browsing context
#[async_trait]
pub trait QueueSource: Send + Sync {
    /// Build the track list and start index for this context
    ///
    /// Never blocks the engine: callers run this off the transport hot path
    /// and apply the plan via [`PlaybackEngine::set_queue`] afterwards.
    ///
    /// [`PlaybackEngine::set_queue`]: crate::PlaybackEngine::set_queue
    async fn populate(&self, catalog: &dyn TrackCatalog) -> Result<QueuePlan>;
}

/// Tracks sharing the focal track's artist or genre
///
/// The catalog ranks related results by descending play count; the focal
/// track is prepended at index 0 so it plays first and the rail continues
/// into similar material.
#[derive(Debug, Clone)]
pub struct RelatedSource {
    focal: Track,
    cap: Option<usize>,
}

impl RelatedSource {
    /// The default "related songs" rail, capped at five results
    pub fn rail(focal: Track) -> Self {
        Self {
            focal,
            cap: Some(RELATED_RAIL_CAP),
        }
    }

    /// The uncapped autoplay rail
    pub fn autoplay(focal: Track) -> Self {
        Self { focal, cap: None }
    }
}

#[async_trait]
impl QueueSource for RelatedSource {
    async fn populate(&self, catalog: &dyn TrackCatalog) -> Result<QueuePlan> {
        let mut related = catalog
            .list_related(&self.focal.id)
            .await
            .map_err(PlaybackError::Population)?;

        if let Some(cap) = self.cap {
            related.truncate(cap);
        }

        debug!(
            focal = %self.focal.id,
            related = related.len(),
            "populated related queue"
        );

        let mut tracks = Vec::with_capacity(related.len() + 1);
        tracks.push(self.focal.clone());
        tracks.extend(related);

        Ok(QueuePlan {
            tracks,
            start_index: 0,
        })
    }
}

/// The full catalog with the focal track pinned to the top
///
/// The catalog's canonical order (descending play count, then descending
/// creation time) is preserved; the list is rotated, not sorted, so every
/// other track keeps its relative position in the loop below the focal
/// track.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    focal_id: TrackId,
}

impl CatalogSource {
    /// Pin `focal_id` to the top of the full catalog
    pub fn new(focal_id: TrackId) -> Self {
        Self { focal_id }
    }
}

#[async_trait]
impl QueueSource for CatalogSource {
    async fn populate(&self, catalog: &dyn TrackCatalog) -> Result<QueuePlan> {
        let mut tracks = catalog
            .list_tracks(&CatalogFilter::default())
            .await
            .map_err(PlaybackError::Population)?;

        if let Some(index) = tracks.iter().position(|t| t.id == self.focal_id) {
            tracks.rotate_left(index);
        } else {
            debug!(focal = %self.focal_id, "focal track not in catalog; keeping canonical order");
        }

        Ok(QueuePlan {
            tracks,
            start_index: 0,
        })
    }
}

/// A caller-supplied list taken verbatim
///
/// Used for user-curated playlists and one-track "play this now" actions.
/// The start index is the requested track's position in the list, or 0
/// when the request is absent or not found.
#[derive(Debug, Clone)]
pub struct ExplicitSource {
    tracks: Vec<Track>,
    requested: Option<TrackId>,
}

impl ExplicitSource {
    /// Queue a list from its beginning
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            requested: None,
        }
    }

    /// Queue a list starting from a requested track
    pub fn starting_at(tracks: Vec<Track>, requested: TrackId) -> Self {
        Self {
            tracks,
            requested: Some(requested),
        }
    }
}

#[async_trait]
impl QueueSource for ExplicitSource {
    async fn populate(&self, _catalog: &dyn TrackCatalog) -> Result<QueuePlan> {
        let start_index = self
            .requested
            .as_ref()
            .and_then(|id| self.tracks.iter().position(|t| &t.id == id))
            .unwrap_or(0);

        Ok(QueuePlan {
            tracks: self.tracks.clone(),
            start_index,
        })
    }
}
