//! Platform-agnostic audio device trait
//!
//! Abstracts the single underlying audio output (an HTML audio element, a
//! native media player, a test double). The engine owns exactly one device
//! instance for its lifetime.

use crate::error::Result;

/// Platform-agnostic audio output device
///
/// Commands flow engine -> device through this trait. Status flows back the
/// other way: the platform wires its media callbacks to
/// [`PlaybackEngine::device_ready`], [`PlaybackEngine::device_ended`],
/// [`PlaybackEngine::device_failed`], and
/// [`PlaybackEngine::device_position`], quoting the generation it received
/// in [`AudioDevice::load`] so the engine can discard callbacks for a track
/// that has since been replaced.
///
/// [`PlaybackEngine::device_ready`]: crate::PlaybackEngine::device_ready
/// [`PlaybackEngine::device_ended`]: crate::PlaybackEngine::device_ended
/// [`PlaybackEngine::device_failed`]: crate::PlaybackEngine::device_failed
/// [`PlaybackEngine::device_position`]: crate::PlaybackEngine::device_position
pub trait AudioDevice: Send {
    /// Begin loading media; readiness is reported asynchronously
    ///
    /// `generation` identifies this load; the platform echoes it back in
    /// every status callback for this media.
    fn load(&mut self, media_url: &str, generation: u64) -> Result<()>;

    /// Start or resume audible output
    fn play(&mut self) -> Result<()>;

    /// Pause output, keeping the loaded media and position
    fn pause(&mut self) -> Result<()>;

    /// Seek to an absolute position in seconds
    ///
    /// The engine clamps before calling; implementations may assume the
    /// position is within the loaded media.
    fn seek(&mut self, position_secs: f64) -> Result<()>;

    /// Apply an output volume in [0, 1]
    fn set_volume(&mut self, volume: f64) -> Result<()>;

    /// Stop output and unload any media
    fn stop(&mut self) -> Result<()>;
}

/// An audio device that accepts every command and produces no sound.
///
/// Used by headless shells and the test suites; pair it with manual calls to
/// the engine's `device_*` callbacks to script device behavior.
#[derive(Debug, Default)]
pub struct NullDevice {
    loaded_url: Option<String>,
    generation: u64,
    playing: bool,
    position_secs: f64,
    volume: f64,
}

impl NullDevice {
    /// Create a new silent device
    pub fn new() -> Self {
        Self {
            loaded_url: None,
            generation: 0,
            playing: false,
            position_secs: 0.0,
            volume: 1.0,
        }
    }

    /// URL of the currently loaded media, if any
    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded_url.as_deref()
    }

    /// Generation passed to the most recent `load`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `play` was the most recent transport command
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Last seek target
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Last applied volume
    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl AudioDevice for NullDevice {
    fn load(&mut self, media_url: &str, generation: u64) -> Result<()> {
        self.loaded_url = Some(media_url.to_string());
        self.generation = generation;
        self.playing = false;
        self.position_secs = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn seek(&mut self, position_secs: f64) -> Result<()> {
        self.position_secs = position_secs;
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.volume = volume;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.loaded_url = None;
        self.playing = false;
        self.position_secs = 0.0;
        Ok(())
    }
}
