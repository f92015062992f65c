//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Playlist has no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Track metadata failed validation
    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    /// Track index outside the playlist
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Skip forward requested on the last track
    #[error("Already at the end of the playlist")]
    EndOfPlaylist,

    /// Audio output fault (failed to load, play, seek...)
    #[error("Audio output error: {0}")]
    AudioOutput(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Session event loop is no longer running
    #[error("Playback session closed")]
    SessionClosed,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
