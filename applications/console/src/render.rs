//! Terminal rendering
//!
//! Keeps a view of the player built from [`PlaybackEvent`]s and turns it into
//! status lines and the playlist listing.

use std::fmt::Write;
use std::time::Duration;
use vibe_playback::{
    format_clock, PlaybackEvent, PlaybackSession, PlaybackState, Playlist, Progress, Track,
};

const BAR_WIDTH: usize = 20;

/// What the front-end knows about the player
#[derive(Debug, Clone)]
pub struct StatusView {
    playlist: Playlist,
    index: usize,
    state: PlaybackState,
    elapsed: Duration,
    volume: f32,
}

impl StatusView {
    pub fn new(playlist: Playlist, snapshot: PlaybackSession) -> Self {
        Self {
            playlist,
            index: snapshot.current_track_index,
            state: snapshot.state,
            elapsed: snapshot.elapsed,
            volume: snapshot.volume_percent,
        }
    }

    /// Update the view; returns a line worth printing, if any
    ///
    /// Position updates arrive on every tick and are absorbed silently.
    pub fn apply(&mut self, event: &PlaybackEvent) -> Option<String> {
        match event {
            PlaybackEvent::StateChanged { state } => {
                self.state = *state;
                Some(self.status_line())
            }
            PlaybackEvent::TrackChanged { index, .. } => {
                self.index = *index;
                self.elapsed = Duration::ZERO;
                Some(format!("Track {}", self.describe(*index)))
            }
            PlaybackEvent::PositionUpdate { elapsed_ms, .. } => {
                self.elapsed = Duration::from_millis(*elapsed_ms);
                None
            }
            PlaybackEvent::TrackFinished { index } => {
                let title = self.track(*index).map_or("?", |t| t.title.as_str());
                Some(format!("Finished: {}", title))
            }
            PlaybackEvent::VolumeChanged { percent } => {
                self.volume = *percent;
                Some(format!("Volume: {:.0}%", percent))
            }
            PlaybackEvent::AudioError { message } => Some(format!("Audio error: {}", message)),
        }
    }

    /// `|| [4/6] In The End - Linkin Park  [#####---------------] 0:54 / 3:36  vol 70%`
    pub fn status_line(&self) -> String {
        let symbol = match self.state.display() {
            PlaybackState::Playing => ">",
            PlaybackState::Loading => "~",
            PlaybackState::Idle | PlaybackState::Paused => "||",
        };

        let Some(track) = self.track(self.index) else {
            return format!("{} (no track)", symbol);
        };
        let progress = Progress::new(self.elapsed, track.duration);

        format!(
            "{} {}  {} {}  vol {:.0}%",
            symbol,
            self.describe(self.index),
            progress_bar(&progress),
            progress,
            self.volume
        )
    }

    /// Numbered playlist with the current track marked
    pub fn playlist_listing(&self) -> String {
        let mut listing = String::from("Playlist:");
        for (i, track) in self.playlist.iter().enumerate() {
            let marker = if i == self.index { '*' } else { ' ' };
            let _ = write!(
                listing,
                "\n{} {:>2}. {} - {} ({})",
                marker,
                i + 1,
                track.title,
                track.artist,
                format_clock(track.duration)
            );
        }
        listing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    fn track(&self, index: usize) -> Option<&Track> {
        self.playlist.get(index)
    }

    fn describe(&self, index: usize) -> String {
        match self.track(index) {
            Some(track) => format!(
                "[{}/{}] {} - {}",
                index + 1,
                self.playlist.len(),
                track.title,
                track.artist
            ),
            None => format!("[{}/{}]", index + 1, self.playlist.len()),
        }
    }
}

fn progress_bar(progress: &Progress) -> String {
    let filled = ((progress.ratio() * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
