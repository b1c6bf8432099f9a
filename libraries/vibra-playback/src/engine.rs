//! Playback engine - core orchestration
//!
//! Coordinates the queue, volume, unlock gate, and the audio device, and
//! owns the "what is audible right now" state machine. UI components never
//! mutate the queue or player state directly; everything goes through the
//! engine's operations.

use std::sync::Arc;

use tracing::{debug, warn};
use vibra_core::traits::SessionRecorder;
use vibra_core::types::Track;

use crate::{
    device::AudioDevice,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    queue::QueueModel,
    sources::QueuePlan,
    types::{EngineState, PlaybackConfig, PlayerState, RepeatMode},
    unlock::UnlockGate,
    volume::Volume,
};

/// Central playback state machine
///
/// States: `Idle` (nothing loaded), `Loading` (media requested, device not
/// yet ready), `Playing`, `Paused`, and the transient `Ended`.
///
/// The engine owns the process's single audio device. Device status
/// callbacks carry the generation issued at load time; a callback whose
/// generation no longer matches the engine's is stale (its track has been
/// replaced) and is discarded without effect.
pub struct PlaybackEngine {
    // State
    state: EngineState,
    current_track: Option<Track>,
    position_secs: f64,
    duration_secs: f64,

    // Queue
    queue: QueueModel,

    // Settings
    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,

    // Serializes per-track device callbacks; bumped on every load
    generation: u64,

    // Whether the current track's play-start has been reported
    start_recorded: bool,

    // Collaborators
    device: Box<dyn AudioDevice>,
    gate: Arc<UnlockGate>,
    recorder: Arc<dyn SessionRecorder>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackEngine {
    /// Create a new playback engine
    ///
    /// The engine takes exclusive ownership of the audio device; the gate
    /// and recorder are shared with the hosting shell.
    pub fn new(
        config: PlaybackConfig,
        mut device: Box<dyn AudioDevice>,
        gate: Arc<UnlockGate>,
        recorder: Arc<dyn SessionRecorder>,
    ) -> Self {
        let volume = Volume::new(config.volume);
        if let Err(err) = device.set_volume(volume.effective()) {
            warn!(%err, "failed to apply initial volume");
        }

        Self {
            state: EngineState::Idle,
            current_track: None,
            position_secs: 0.0,
            duration_secs: 0.0,
            queue: QueueModel::new(),
            volume,
            shuffle: config.shuffle,
            repeat: config.repeat,
            generation: 0,
            start_recorded: false,
            device,
            gate,
            recorder,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue installation =====

    /// Replace the queue with a populated plan
    ///
    /// This is the explicit hand-off point from a queue source to the
    /// engine. The cursor lands on the plan's start index; playback does
    /// not start until a transport command asks for it. An empty plan is a
    /// logged no-op (the old queue stays authoritative).
    pub fn set_queue(&mut self, plan: QueuePlan) {
        if plan.tracks.is_empty() {
            warn!("queue source produced no tracks; keeping current queue");
            return;
        }

        self.queue.set_queue(plan.tracks, plan.start_index);
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Replace the queue and immediately start its start track
    pub fn set_queue_and_play(&mut self, plan: QueuePlan) -> Result<()> {
        self.set_queue(plan);
        let track = self.queue.current().cloned().ok_or(PlaybackError::QueueEmpty)?;
        self.begin_load(track)
    }

    // ===== Playback Control =====

    /// Start or resume playback
    pub fn play(&mut self) -> Result<()> {
        match self.state {
            EngineState::Playing | EngineState::Loading => Ok(()),
            EngineState::Paused => self.resume(),
            EngineState::Idle | EngineState::Ended => {
                let track = self.queue.current().cloned().ok_or(PlaybackError::QueueEmpty)?;
                self.begin_load(track)
            }
        }
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        if self.state == EngineState::Playing {
            self.device.pause()?;
            self.set_state(EngineState::Paused);
        }
        Ok(())
    }

    /// Toggle between playing and paused
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.state == EngineState::Playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Play the track at a queue index
    pub fn play_at(&mut self, index: usize) -> Result<()> {
        let track = self
            .queue
            .jump_to(index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;
        self.begin_load(track)
    }

    /// Play a specific track immediately
    ///
    /// If the track is present in the queue the cursor moves to it so
    /// advance/retreat continue from there; otherwise the queue is left
    /// untouched and only the current track changes.
    pub fn play_track(&mut self, track: Track) -> Result<()> {
        if let Some(index) = self.queue.find(&track.id) {
            self.queue.jump_to(index);
        }
        self.begin_load(track)
    }

    /// Skip to the next track
    ///
    /// Manual skips bypass the natural-completion policy: repeat-one does
    /// not pin the cursor here, and the queue wraps at the end regardless
    /// of repeat mode.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        let skip_repeat = match self.repeat {
            RepeatMode::One => RepeatMode::All,
            other => other,
        };
        let index = self
            .queue
            .next_index(self.shuffle, skip_repeat)
            .ok_or(PlaybackError::QueueEmpty)?;
        self.play_at(index)
    }

    /// Go back to the previous track
    pub fn previous(&mut self) -> Result<()> {
        let index = self.queue.previous_index().ok_or(PlaybackError::QueueEmpty)?;
        self.play_at(index)
    }

    /// Stop playback and unload the current track (the queue is kept)
    pub fn stop(&mut self) -> Result<()> {
        self.record_departure();
        self.current_track = None;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.device.stop()?;
        self.set_state(EngineState::Idle);
        Ok(())
    }

    // ===== Seek =====

    /// Seek to an absolute position in seconds
    ///
    /// The position is clamped into `[0, duration]`. Valid while playing or
    /// paused; a no-op in `Idle`, `Loading`, and `Ended` (there is nothing
    /// stable to seek within).
    pub fn seek(&mut self, position_secs: f64) -> Result<()> {
        match self.state {
            EngineState::Playing | EngineState::Paused => {
                let clamped = position_secs.clamp(0.0, self.duration_secs);
                self.device.seek(clamped)?;
                self.position_secs = clamped;
                self.emit(PlaybackEvent::PositionUpdate {
                    position_secs: clamped,
                    duration_secs: self.duration_secs,
                });
                Ok(())
            }
            _ => {
                debug!(state = ?self.state, "seek ignored");
                Ok(())
            }
        }
    }

    // ===== Volume =====

    /// Set the volume, clamped into [0, 1]
    ///
    /// Valid in every state; does not change the playback state.
    pub fn set_volume(&mut self, level: f64) -> Result<()> {
        self.volume.set_level(level);
        self.apply_volume()
    }

    /// Get the requested volume level
    pub fn get_volume(&self) -> f64 {
        self.volume.level()
    }

    /// Mute audio, preserving the level
    pub fn mute(&mut self) -> Result<()> {
        self.volume.mute();
        self.apply_volume()
    }

    /// Unmute audio, restoring the previous level
    pub fn unmute(&mut self) -> Result<()> {
        self.volume.unmute();
        self.apply_volume()
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) -> Result<()> {
        self.volume.toggle_mute();
        self.apply_volume()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    fn apply_volume(&mut self) -> Result<()> {
        self.device.set_volume(self.volume.effective())?;
        self.emit(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
        Ok(())
    }

    // ===== Like =====

    /// Optimistically flip the current track's liked flag
    ///
    /// The flip is local only; reconciliation with the favorites service is
    /// the UI layer's job and a failed reconciliation does not roll the
    /// flag back. Returns the new value.
    pub fn toggle_like(&mut self) -> Result<bool> {
        let track = self
            .current_track
            .as_mut()
            .ok_or(PlaybackError::NoTrackLoaded)?;
        track.is_liked = !track.is_liked;
        Ok(track.is_liked)
    }

    // ===== Shuffle & Repeat =====

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    /// Get current shuffle state
    pub fn is_shuffling(&self) -> bool {
        self.shuffle
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Get current repeat mode
    pub fn get_repeat(&self) -> RepeatMode {
        self.repeat
    }

    // ===== Device callbacks =====

    /// Device reports the loaded media is ready to play
    ///
    /// Transitions `Loading -> Playing` when the unlock gate is satisfied;
    /// on a still-locked mobile runtime the engine parks in `Paused` and
    /// emits [`PlaybackEvent::AutoplayBlocked`] so the shell can show a
    /// "tap to play" prompt.
    pub fn device_ready(&mut self, generation: u64) {
        if self.is_stale(generation) || self.state != EngineState::Loading {
            return;
        }
        let Some(track_id) = self.current_track.as_ref().map(|t| t.id.clone()) else {
            return;
        };

        if !self.gate.is_unlocked() {
            self.set_state(EngineState::Paused);
            self.emit(PlaybackEvent::AutoplayBlocked { track_id });
            return;
        }

        match self.device.play() {
            Ok(()) => {
                self.set_state(EngineState::Playing);
                self.recorder.record(&track_id, 0);
                self.start_recorded = true;
            }
            Err(err) => self.fail_load(&err.to_string()),
        }
    }

    /// Device reports a position update
    ///
    /// Also detects natural completion: a playing track whose position
    /// reaches its duration transitions through `Ended` into auto-advance.
    pub fn device_position(&mut self, generation: u64, position_secs: f64) {
        if self.is_stale(generation) {
            return;
        }
        if !matches!(self.state, EngineState::Playing | EngineState::Paused) {
            return;
        }

        self.position_secs = position_secs.clamp(0.0, self.duration_secs);
        self.emit(PlaybackEvent::PositionUpdate {
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
        });

        if self.state == EngineState::Playing
            && self.duration_secs > 0.0
            && self.position_secs >= self.duration_secs
        {
            self.finish_track();
        }
    }

    /// Device reports the media played to its end
    pub fn device_ended(&mut self, generation: u64) {
        if self.is_stale(generation) || self.state != EngineState::Playing {
            return;
        }
        self.finish_track();
    }

    /// Device reports the media failed to load or decode
    ///
    /// The engine returns to `Idle` and does **not** auto-advance, so a
    /// queue of broken locators cannot rapid-fire through every track.
    pub fn device_failed(&mut self, generation: u64, reason: &str) {
        if self.is_stale(generation) {
            return;
        }
        self.fail_load(reason);
    }

    // ===== State Queries =====

    /// Get current engine state
    pub fn get_state(&self) -> EngineState {
        self.state
    }

    /// Get the denormalized current track snapshot
    pub fn get_current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Get current playback position in seconds
    pub fn get_position(&self) -> f64 {
        self.position_secs
    }

    /// Get current track duration in seconds
    pub fn get_duration(&self) -> f64 {
        self.duration_secs
    }

    /// Read access to the queue
    pub fn queue(&self) -> &QueueModel {
        &self.queue
    }

    /// Generation of the most recent load (for wiring device callbacks)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Snapshot of the player for UI rendering
    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            current_track: self.current_track.clone(),
            is_playing: self.state == EngineState::Playing,
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
            volume: self.volume.level(),
            is_shuffling: self.shuffle,
            repeat: self.repeat,
        }
    }

    /// Drain accumulated events
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    /// Load a track snapshot into the device and enter `Loading`
    fn begin_load(&mut self, track: Track) -> Result<()> {
        self.record_departure();

        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());

        self.generation += 1;
        self.start_recorded = false;
        self.current_track = Some(track.clone());
        self.position_secs = 0.0;
        self.duration_secs = f64::from(track.duration_secs);

        self.emit(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.set_state(EngineState::Loading);

        if let Err(err) = self.device.load(&track.media_url, self.generation) {
            let reason = err.to_string();
            self.fail_load(&reason);
            return Err(PlaybackError::LoadFailed {
                track_id: track.id,
                reason,
            });
        }
        Ok(())
    }

    /// Natural completion: report, then advance per the repeat/shuffle
    /// policy
    fn finish_track(&mut self) {
        let Some(track_id) = self.current_track.as_ref().map(|t| t.id.clone()) else {
            return;
        };

        self.position_secs = self.duration_secs;
        self.set_state(EngineState::Ended);
        self.emit(PlaybackEvent::TrackFinished {
            track_id: track_id.clone(),
        });
        self.recorder.record(&track_id, 100);

        // With repeat off and no shuffle, a single pass through the queue
        // ends playback instead of wrapping to the first track.
        if self.repeat == RepeatMode::Off && !self.shuffle && self.queue.is_last() {
            self.current_track = None;
            self.position_secs = 0.0;
            self.duration_secs = 0.0;
            if let Err(err) = self.device.stop() {
                warn!(%err, "device stop failed after queue exhaustion");
            }
            self.emit(PlaybackEvent::QueueExhausted);
            self.set_state(EngineState::Idle);
            return;
        }

        let Some(index) = self.queue.next_index(self.shuffle, self.repeat) else {
            self.set_state(EngineState::Idle);
            return;
        };
        let Some(track) = self.queue.jump_to(index).cloned() else {
            self.set_state(EngineState::Idle);
            return;
        };

        // Load failures are surfaced inside begin_load; auto-advance stops
        // there rather than skipping onward.
        if let Err(err) = self.begin_load(track) {
            warn!(%err, "auto-advance failed to load next track");
        }
    }

    /// Resume from pause, re-checking the unlock gate
    fn resume(&mut self) -> Result<()> {
        let Some(track_id) = self.current_track.as_ref().map(|t| t.id.clone()) else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        if !self.gate.is_unlocked() {
            self.emit(PlaybackEvent::AutoplayBlocked { track_id });
            return Ok(());
        }

        self.device.play()?;
        self.set_state(EngineState::Playing);

        // First audible moment for a track parked by the autoplay gate
        if !self.start_recorded {
            self.recorder.record(&track_id, 0);
            self.start_recorded = true;
        }
        Ok(())
    }

    /// Media load failure: back to `Idle`, surface the error, no advance
    fn fail_load(&mut self, reason: &str) {
        let track_id = self.current_track.as_ref().map(|t| t.id.clone());
        warn!(?track_id, reason, "media failed to load");

        self.current_track = None;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        if let Err(err) = self.device.stop() {
            warn!(%err, "device stop failed after load failure");
        }
        self.emit(PlaybackEvent::Error {
            message: match track_id {
                Some(id) => format!("failed to load track {id}: {reason}"),
                None => format!("failed to load track: {reason}"),
            },
        });
        self.set_state(EngineState::Idle);
    }

    /// Report how much of the departing track had played
    ///
    /// Fires only when a loaded track is abandoned mid-flight (skip,
    /// replacement, stop); natural completion reports 100 from
    /// `finish_track` instead.
    fn record_departure(&mut self) {
        if !matches!(self.state, EngineState::Playing | EngineState::Paused) {
            return;
        }
        if let Some(track) = &self.current_track {
            self.recorder.record(&track.id, self.completed_percentage());
        }
    }

    fn completed_percentage(&self) -> u8 {
        if self.duration_secs <= 0.0 {
            return 0;
        }
        let pct = (self.position_secs / self.duration_secs * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "discarding stale device callback"
            );
            return true;
        }
        false
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state != state {
            self.state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}
