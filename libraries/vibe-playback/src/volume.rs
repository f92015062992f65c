//! Volume control
//!
//! Volume is a percentage in 0-100 as shown by the volume slider. The audio
//! output receives it normalized to 0.0-1.0 (`percent / 100`).

/// Volume controller with clamped percentage
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    percent: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `percent` - Initial volume, clamped into 0-100 (NaN becomes 0)
    pub fn new(percent: f32) -> Self {
        let mut volume = Self { percent: 0.0 };
        volume.set_percent(percent);
        volume
    }

    /// Set volume level, clamped into 0-100
    ///
    /// Returns `false` and leaves the level untouched for NaN.
    pub fn set_percent(&mut self, percent: f32) -> bool {
        if percent.is_nan() {
            return false;
        }
        self.percent = percent.clamp(0.0, 100.0);
        true
    }

    /// Get current volume level (0-100)
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Level forwarded to the audio output (0.0-1.0)
    pub fn normalized(&self) -> f32 {
        self.percent / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70.0) // Slider starts at 70%
    }
}
