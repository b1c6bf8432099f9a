//! Vibra Player - Playback Management
//!
//! Platform-agnostic playback and queue management for Vibra Player.
//!
//! This crate provides:
//! - Cursor-based playback queue (wrap-around advance, shuffle, repeat)
//! - Playback engine state machine (idle, loading, playing, paused, ended)
//! - Autoplay unlock gate for mobile runtimes
//! - Queue sources (related rail, full catalog, explicit lists)
//! - Volume control with mute memory
//! - Playback events for UI synchronization
//!
//! # Architecture
//!
//! `vibra-playback` is completely platform-agnostic:
//! - No dependency on any concrete audio backend
//! - No dependency on the HTTP clients (`vibra-api-client`)
//! - Works in desktop shells, mobile shells, and tests
//!
//! Platform-specific concerns (the actual audio element, gesture delivery)
//! are provided via traits: [`AudioDevice`] for output and [`UnlockProbe`]
//! for mobile audio activation. The engine owns the process's single audio
//! device; device status flows back through the `device_*` callbacks with a
//! generation stamp so stale callbacks for replaced tracks are discarded.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use std::sync::Arc;
//! use vibra_core::traits::NoopRecorder;
//! use vibra_core::types::{ArtistId, Track};
//! use vibra_playback::{
//!     NullDevice, PlaybackConfig, PlaybackEngine, QueuePlan, UnlockGate,
//! };
//!
//! let mut engine = PlaybackEngine::new(
//!     PlaybackConfig::default(),
//!     Box::new(NullDevice::new()),
//!     Arc::new(UnlockGate::desktop()),
//!     Arc::new(NoopRecorder),
//! );
//!
//! let mut track = Track::new("My Song", ArtistId::new("artist-1"), "Artist Name");
//! track.duration_secs = 180;
//! track.media_url = "https://cdn.example.com/my-song.mp3".to_string();
//!
//! engine.set_queue(QueuePlan {
//!     tracks: vec![track],
//!     start_index: 0,
//! });
//! engine.play().unwrap();
//!
//! // The platform echoes the generation it received at load time
//! let generation = engine.generation();
//! engine.device_ready(generation);
//! assert!(engine.snapshot().is_playing);
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use std::sync::Arc;
//! use vibra_core::traits::NoopRecorder;
//! use vibra_playback::{
//!     NullDevice, PlaybackConfig, PlaybackEngine, RepeatMode, UnlockGate,
//! };
//!
//! let mut engine = PlaybackEngine::new(
//!     PlaybackConfig::default(),
//!     Box::new(NullDevice::new()),
//!     Arc::new(UnlockGate::desktop()),
//!     Arc::new(NoopRecorder),
//! );
//!
//! engine.set_shuffle(true);
//! engine.set_repeat(RepeatMode::All);
//! ```
//!
//! # Example: Populating the queue from a source
//!
//! ```ignore
//! use vibra_playback::{QueueSource, RelatedSource};
//!
//! // catalog: &dyn TrackCatalog, focal: Track
//! let plan = RelatedSource::autoplay(focal).populate(catalog).await?;
//! engine.set_queue_and_play(plan)?;
//! ```

mod device;
mod engine;
mod error;
mod events;
mod queue;
mod sources;
pub mod types;
mod unlock;
mod volume;

// Public exports
pub use device::{AudioDevice, NullDevice};
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::QueueModel;
pub use sources::{CatalogSource, ExplicitSource, QueuePlan, QueueSource, RelatedSource};
pub use types::{EngineState, PlaybackConfig, PlayerState, RepeatMode};
pub use unlock::{
    AlwaysReadyProbe, GestureArm, GestureKind, Platform, UnlockGate, UnlockProbe,
    UnlockSubscription,
};
