//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single playable song entry
///
/// Immutable once loaded into a [`Playlist`](crate::Playlist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Opaque locator handed to the audio output (URL, file path...)
    pub source: String,

    /// Track duration
    #[serde(rename = "duration_secs", with = "duration_secs")]
    pub duration: Duration,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source: source.into(),
            duration,
        }
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing played yet (shown as paused)
    Idle,

    /// Waiting for the audio output to finish loading
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl PlaybackState {
    /// State as the player UI presents it (idle renders as paused)
    pub fn display(self) -> Self {
        match self {
            Self::Idle => Self::Paused,
            other => other,
        }
    }
}

/// What a manual track selection does to a session that is not playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectBehavior {
    /// Playing keeps playing the new track, paused stays paused
    #[default]
    KeepState,

    /// Selecting a track always starts playback
    AutoResume,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 70)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Tick cadence in milliseconds (default: 100)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Track selection policy while paused (default: KeepState)
    #[serde(default)]
    pub select_behavior: SelectBehavior,

    /// Enter `Loading` on every track change until the output reports it loaded
    #[serde(default)]
    pub wait_for_load: bool,

    /// Skip-back restarts the current track past this position (default: 3000)
    #[serde(default = "default_restart_threshold_ms")]
    pub restart_threshold_ms: u64,
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn restart_threshold(&self) -> Duration {
        Duration::from_millis(self.restart_threshold_ms)
    }
}

fn default_volume() -> f32 {
    70.0
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_restart_threshold_ms() -> u64 {
    3000
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            tick_interval_ms: default_tick_interval_ms(),
            select_behavior: SelectBehavior::default(),
            wait_for_load: false,
            restart_threshold_ms: default_restart_threshold_ms(),
        }
    }
}

/// Snapshot of what is loaded, in which state, and at what position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSession {
    pub current_track_index: usize,
    pub state: PlaybackState,
    #[serde(rename = "elapsed_secs", with = "duration_secs")]
    pub elapsed: Duration,
    pub volume_percent: f32,
}

/// Serializes a `Duration` as fractional seconds
pub(crate) mod duration_secs {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| D::Error::custom(format!("invalid duration {secs}: {e}")))
    }
}
