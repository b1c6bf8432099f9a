//! Volume control
//!
//! Tracks the requested level and mute state. The level lives in [0, 1],
//! matching what streaming audio elements accept; out-of-range requests are
//! clamped rather than rejected.

/// Volume controller
///
/// The level is preserved across mute/unmute so unmuting restores the
/// previous loudness.
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level in [0, 1]
    level: f64,

    /// Mute state (preserves the level)
    muted: bool,
}

impl Volume {
    /// Create a new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume, clamped into [0, 1]
    pub fn new(level: f64) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
            muted: false,
        }
    }

    /// Set the volume level, clamped into [0, 1]
    pub fn set_level(&mut self, level: f64) {
        self.level = level.clamp(0.0, 1.0);
    }

    /// Get the requested volume level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Mute audio (preserves the level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores the previous level)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// The level the audio device should actually apply
    ///
    /// Returns 0.0 while muted, otherwise the requested level.
    pub fn effective(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
