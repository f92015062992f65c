//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are emitted at
//! key points:
//! - State changes (play/pause/loading)
//! - Track changes (manual selection or auto-advance)
//! - Position updates (every tick and on seek)
//! - Volume changes
//! - Audio output faults

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Active track changed
    TrackChanged {
        /// Playlist index of the new track
        index: usize,
        /// Playlist index of the track that was active before
        previous_index: usize,
    },

    /// Position update for the progress bar
    PositionUpdate {
        /// Current playback position
        elapsed_ms: u64,
        /// Total track duration
        duration_ms: u64,
        /// Progress bar width (0.0-100.0)
        percent: f64,
    },

    /// Track played to its end
    TrackFinished {
        /// Playlist index of the finished track
        index: usize,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        percent: f32,
    },

    /// Audio output reported a fault (log-only, state untouched)
    AudioError {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Name used when forwarding events to a UI layer
    pub fn name(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "playback:state-changed",
            Self::TrackChanged { .. } => "playback:track-changed",
            Self::PositionUpdate { .. } => "playback:position-updated",
            Self::TrackFinished { .. } => "playback:track-finished",
            Self::VolumeChanged { .. } => "playback:volume-changed",
            Self::AudioError { .. } => "playback:error",
        }
    }
}
