//! Playback queue
//!
//! Holds the authoritative ordered list of tracks eligible for playback and
//! the cursor pointing at "now playing". The sequence is replaced wholesale
//! whenever a queue source runs; advance/retreat operations mutate only the
//! cursor.

use crate::types::RepeatMode;
use rand::Rng;
use tracing::warn;
use vibra_core::types::{Track, TrackId};

/// Ordered track sequence plus a cursor
///
/// Invariants:
/// - the cursor is `Some(i)` with `i < len` whenever the sequence is
///   non-empty, and `None` iff the sequence is empty
/// - duplicates are allowed; insertion order is playback order
#[derive(Debug, Clone, Default)]
pub struct QueueModel {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl QueueModel {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            cursor: None,
        }
    }

    /// Replace the sequence and cursor atomically
    ///
    /// `start_index` is clamped into range. Replacing a queue with an empty
    /// track list is a logged no-op: the old sequence and cursor stay
    /// authoritative.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        if tracks.is_empty() {
            warn!("ignoring empty queue replacement; keeping current queue");
            return;
        }

        let cursor = start_index.min(tracks.len() - 1);
        self.tracks = tracks;
        self.cursor = Some(cursor);
    }

    /// The index to play after the current track finishes
    ///
    /// - `RepeatMode::One` pins the current index regardless of shuffle.
    /// - Shuffling picks a uniformly random index different from the current
    ///   one when more than one track is queued.
    /// - Otherwise the cursor advances by one, wrapping at the end. Whether
    ///   playback actually continues past the wrap under `RepeatMode::Off`
    ///   is the engine's policy, not the queue's.
    ///
    /// Returns `None` on an empty queue.
    pub fn next_index(&self, is_shuffling: bool, repeat: RepeatMode) -> Option<usize> {
        let len = self.tracks.len();
        let current = self.cursor?;

        if repeat == RepeatMode::One {
            return Some(current);
        }

        if is_shuffling {
            if len == 1 {
                return Some(current);
            }
            // Sample from [0, len-1) and shift past the current index so the
            // draw is uniform over the other len-1 positions.
            let mut rng = rand::thread_rng();
            let pick = rng.gen_range(0..len - 1);
            return Some(if pick >= current { pick + 1 } else { pick });
        }

        Some((current + 1) % len)
    }

    /// The index to play when stepping backwards
    ///
    /// Wraps from the first track to the last. Shuffle does not affect
    /// backwards navigation.
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        let current = self.cursor?;
        Some((current + len - 1) % len)
    }

    /// Find the index of a track in the current sequence
    pub fn find(&self, track_id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == track_id)
    }

    /// Move the cursor to `index` and return the track there
    pub fn jump_to(&mut self, index: usize) -> Option<&Track> {
        if index < self.tracks.len() {
            self.cursor = Some(index);
            self.tracks.get(index)
        } else {
            None
        }
    }

    /// The track under the cursor
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|i| self.tracks.get(i))
    }

    /// Current cursor position
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether the cursor sits on the final queue position
    pub fn is_last(&self) -> bool {
        match self.cursor {
            Some(i) => i + 1 == self.tracks.len(),
            None => false,
        }
    }

    /// All queued tracks in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
