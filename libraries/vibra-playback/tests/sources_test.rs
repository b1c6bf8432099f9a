//! Integration tests for queue sources
//!
//! Uses a scripted in-memory catalog in place of the HTTP client.

use async_trait::async_trait;
use vibra_core::traits::{CatalogFilter, TrackCatalog};
use vibra_core::types::{ArtistId, Track, TrackId};
use vibra_core::VibraError;
use vibra_playback::{
    CatalogSource, ExplicitSource, PlaybackError, QueueSource, RelatedSource,
};

// ===== Test Helpers =====

/// In-memory catalog returning pre-scripted lists
struct StubCatalog {
    tracks: Vec<Track>,
    related: Vec<Track>,
    fail: bool,
}

impl StubCatalog {
    fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            related: Vec::new(),
            fail: false,
        }
    }

    fn with_related(mut self, related: Vec<Track>) -> Self {
        self.related = related;
        self
    }

    fn failing() -> Self {
        Self {
            tracks: Vec::new(),
            related: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl TrackCatalog for StubCatalog {
    async fn list_tracks(&self, _filter: &CatalogFilter) -> vibra_core::Result<Vec<Track>> {
        if self.fail {
            return Err(VibraError::network("connection refused"));
        }
        Ok(self.tracks.clone())
    }

    async fn get_track(&self, id: &TrackId) -> vibra_core::Result<Track> {
        self.tracks
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| VibraError::TrackNotFound(id.clone()))
    }

    async fn list_related(&self, _id: &TrackId) -> vibra_core::Result<Vec<Track>> {
        if self.fail {
            return Err(VibraError::network("connection refused"));
        }
        Ok(self.related.clone())
    }
}

fn track(id: &str) -> Track {
    let mut t = Track::new(format!("Track {id}"), ArtistId::new("artist-1"), "Artist");
    t.id = TrackId::new(id);
    t.duration_secs = 180;
    t.media_url = format!("https://cdn.example.com/{id}.mp3");
    t
}

fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}

// ===== RelatedSource =====

#[tokio::test]
async fn related_rail_prepends_focal_and_caps_results() {
    let related: Vec<Track> = ["r1", "r2", "r3", "r4", "r5", "r6", "r7"]
        .iter()
        .map(|id| track(id))
        .collect();
    let catalog = StubCatalog::new(Vec::new()).with_related(related);

    let plan = RelatedSource::rail(track("focal"))
        .populate(&catalog)
        .await
        .unwrap();

    assert_eq!(plan.start_index, 0);
    assert_eq!(
        ids(&plan.tracks),
        vec!["focal", "r1", "r2", "r3", "r4", "r5"]
    );
}

#[tokio::test]
async fn related_autoplay_rail_is_uncapped() {
    let related: Vec<Track> = (0..20).map(|i| track(&format!("r{i}"))).collect();
    let catalog = StubCatalog::new(Vec::new()).with_related(related);

    let plan = RelatedSource::autoplay(track("focal"))
        .populate(&catalog)
        .await
        .unwrap();

    assert_eq!(plan.tracks.len(), 21);
    assert_eq!(plan.tracks[0].id.as_str(), "focal");
}

#[tokio::test]
async fn related_with_no_results_still_queues_the_focal_track() {
    let catalog = StubCatalog::new(Vec::new());

    let plan = RelatedSource::rail(track("focal"))
        .populate(&catalog)
        .await
        .unwrap();

    assert_eq!(ids(&plan.tracks), vec!["focal"]);
    assert_eq!(plan.start_index, 0);
}

// ===== CatalogSource =====

#[tokio::test]
async fn catalog_rotates_focal_to_the_front() {
    let catalog = StubCatalog::new(vec![track("A"), track("B"), track("C"), track("D")]);

    let plan = CatalogSource::new(TrackId::new("C"))
        .populate(&catalog)
        .await
        .unwrap();

    assert_eq!(ids(&plan.tracks), vec!["C", "D", "A", "B"]);
    assert_eq!(plan.start_index, 0);
}

#[tokio::test]
async fn catalog_keeps_canonical_order_when_focal_is_absent() {
    let catalog = StubCatalog::new(vec![track("A"), track("B"), track("C")]);

    let plan = CatalogSource::new(TrackId::new("missing"))
        .populate(&catalog)
        .await
        .unwrap();

    assert_eq!(ids(&plan.tracks), vec!["A", "B", "C"]);
    assert_eq!(plan.start_index, 0);
}

#[tokio::test]
async fn catalog_rotation_of_first_track_is_identity() {
    let catalog = StubCatalog::new(vec![track("A"), track("B"), track("C")]);

    let plan = CatalogSource::new(TrackId::new("A"))
        .populate(&catalog)
        .await
        .unwrap();

    assert_eq!(ids(&plan.tracks), vec!["A", "B", "C"]);
}

// ===== ExplicitSource =====

#[tokio::test]
async fn explicit_list_is_taken_verbatim() {
    let catalog = StubCatalog::new(Vec::new());
    let playlist = vec![track("p1"), track("p2"), track("p3")];

    let plan = ExplicitSource::starting_at(playlist, TrackId::new("p2"))
        .populate(&catalog)
        .await
        .unwrap();

    assert_eq!(ids(&plan.tracks), vec!["p1", "p2", "p3"]);
    assert_eq!(plan.start_index, 1);
}

#[tokio::test]
async fn explicit_start_defaults_to_zero_when_request_is_absent() {
    let catalog = StubCatalog::new(Vec::new());
    let playlist = vec![track("p1"), track("p2")];

    let plan = ExplicitSource::starting_at(playlist.clone(), TrackId::new("nope"))
        .populate(&catalog)
        .await
        .unwrap();
    assert_eq!(plan.start_index, 0);

    let plan = ExplicitSource::new(playlist).populate(&catalog).await.unwrap();
    assert_eq!(plan.start_index, 0);
}

// ===== Failure propagation =====

#[tokio::test]
async fn population_failure_is_reported_not_swallowed() {
    let catalog = StubCatalog::failing();

    let err = CatalogSource::new(TrackId::new("A"))
        .populate(&catalog)
        .await
        .unwrap_err();
    assert!(matches!(err, PlaybackError::Population(_)));

    let err = RelatedSource::rail(track("focal"))
        .populate(&catalog)
        .await
        .unwrap_err();
    assert!(matches!(err, PlaybackError::Population(_)));
}
