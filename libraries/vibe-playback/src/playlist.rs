//! Static playlist
//!
//! Fixed, ordered, non-empty list of tracks. Insertion order is playback
//! order. Read-only once constructed.

use crate::error::{PlaybackError, Result};
use crate::types::Track;
use serde::Serialize;

/// Ordered playlist of tracks
///
/// ```text
///  0: The Scientist        (current)
///  1: Bring Me To Life     <- next_index(0)
///  2: The Reason
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist, validating every track
    ///
    /// Fails on an empty list or on a track with zero duration.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }

        if let Some((index, track)) = tracks
            .iter()
            .enumerate()
            .find(|(_, t)| t.duration.is_zero())
        {
            return Err(PlaybackError::InvalidTrack(format!(
                "track {} ({:?}) has zero duration",
                index, track.title
            )));
        }

        Ok(Self { tracks })
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks (never zero)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.tracks.len()
    }

    /// Index following `index`, if any
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index.checked_add(1)?;
        self.contains_index(next).then_some(next)
    }

    /// Index preceding `index`, if any
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        let previous = index.checked_sub(1)?;
        self.contains_index(previous).then_some(previous)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
