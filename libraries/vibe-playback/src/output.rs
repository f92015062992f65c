//! Platform-agnostic audio output trait
//!
//! Abstracts the component that actually produces sound (a browser media
//! element, a native player, a test recorder). The controller commands it but
//! does not own its lifecycle.

use crate::error::Result;
use crate::types::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audio output collaborator
///
/// Implementors start/stop playback, jump to positions and apply volume for
/// the currently loaded track. Faults are reported as `Err`; the controller
/// logs them and keeps its state.
pub trait AudioOutput: Send {
    /// Point the output at a new track's source
    ///
    /// The output should answer with [`AudioNotification::Loaded`] or
    /// [`AudioNotification::Error`] once the resource is ready or failed.
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Start or resume playback at the current position
    fn play(&mut self) -> Result<()>;

    /// Halt playback, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Jump to a position from the start of the track
    fn set_position(&mut self, position: Duration) -> Result<()>;

    /// Apply volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

/// Notifications emitted by the audio output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioNotification {
    /// Resource loaded and ready to play
    Loaded,

    /// Resource failed to load or play
    Error(String),

    /// Current track played to its end
    Ended,
}
