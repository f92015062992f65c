//! Playback controller - core state machine
//!
//! Owns the playback session (state, current track, elapsed time, volume),
//! derives progress and commands the audio output.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    output::{AudioNotification, AudioOutput},
    playlist::Playlist,
    progress::Progress,
    types::{PlaybackConfig, PlaybackSession, PlaybackState, SelectBehavior, Track},
    volume::Volume,
};
use std::time::Duration;

/// Central playback state machine
///
/// ```text
///   idle ──toggle──> playing <──toggle──> paused
///                       │  ^
///            track end  │  │ loaded (resume)
///                       v  │
///                     loading ──loaded──> paused
/// ```
///
/// - `toggle` is a no-op while loading
/// - `tick` only advances time while playing
/// - reaching the end of a track auto-advances, or pauses and rewinds on the
///   last track
/// - audio output faults are logged and surfaced as events, never as state
pub struct PlaybackController {
    // State
    state: PlaybackState,
    current_index: usize,
    elapsed: Duration,
    resume_after_load: bool,

    // Collaborators
    playlist: Playlist,
    output: Box<dyn AudioOutput>,

    // Settings
    volume: Volume,
    select_behavior: SelectBehavior,
    wait_for_load: bool,
    restart_threshold: Duration,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller positioned on the first track
    ///
    /// Loads the first track into the output and applies the initial volume.
    pub fn new(playlist: Playlist, config: &PlaybackConfig, output: Box<dyn AudioOutput>) -> Self {
        let mut controller = Self {
            state: PlaybackState::Idle,
            current_index: 0,
            elapsed: Duration::ZERO,
            resume_after_load: false,
            playlist,
            output,
            volume: Volume::new(config.volume),
            select_behavior: config.select_behavior,
            wait_for_load: config.wait_for_load,
            restart_threshold: config.restart_threshold(),
            pending_events: Vec::new(),
        };

        controller.load_current();
        if controller.wait_for_load {
            controller.set_state(PlaybackState::Loading);
        }

        let result = controller.output.set_volume(controller.volume.normalized());
        controller.report(result, "set_volume");

        controller
    }

    // ===== Playback Control =====

    /// Play/pause button
    ///
    /// Flips playing and paused. Does nothing while loading.
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Loading => {
                tracing::debug!("Toggle ignored while loading");
            }
            PlaybackState::Playing => self.pause(),
            PlaybackState::Idle | PlaybackState::Paused => self.play(),
        }
    }

    /// Start or resume playback at the current position
    pub fn play(&mut self) {
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Loading) {
            return;
        }

        self.set_state(PlaybackState::Playing);
        let result = self.output.play();
        self.report(result, "play");
    }

    /// Pause playback, keeping the position
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }

        self.set_state(PlaybackState::Paused);
        let result = self.output.pause();
        self.report(result, "pause");
    }

    // ===== Seek =====

    /// Seek to position in current track
    ///
    /// Clamped into `[0, duration]`. Valid in any state, never changes it.
    pub fn seek(&mut self, target: Duration) {
        let position = target.min(self.duration());
        self.elapsed = position;

        let result = self.output.set_position(position);
        self.report(result, "set_position");
        self.emit_position_update();
    }

    /// Seek to position in current track (0-100% of the duration)
    pub fn seek_to_percent(&mut self, percent: f32) {
        if percent.is_nan() {
            tracing::warn!("Ignoring seek to NaN percent");
            return;
        }

        let fraction = f64::from(percent.clamp(0.0, 100.0)) / 100.0;
        self.seek(self.duration().mul_f64(fraction));
    }

    // ===== Volume =====

    /// Set volume (0-100), forwarded to the output as 0.0-1.0
    pub fn set_volume(&mut self, percent: f32) {
        if !self.volume.set_percent(percent) {
            tracing::warn!("Ignoring NaN volume");
            return;
        }

        let result = self.output.set_volume(self.volume.normalized());
        self.report(result, "set_volume");
        self.emit(PlaybackEvent::VolumeChanged {
            percent: self.volume.percent(),
        });
    }

    // ===== Track Selection =====

    /// Switch to the track at `index`
    ///
    /// Resets elapsed time to zero. A playing session keeps playing the new
    /// track; a paused one follows the configured [`SelectBehavior`].
    /// Out-of-range indices are rejected and change nothing.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        if !self.playlist.contains_index(index) {
            tracing::warn!(
                "Ignoring selection of track {} (playlist has {})",
                index,
                self.playlist.len()
            );
            return Err(PlaybackError::IndexOutOfBounds(index));
        }

        self.switch_to(index);
        Ok(())
    }

    /// Skip forward to the next track
    pub fn next(&mut self) -> Result<()> {
        let next = self
            .playlist
            .next_index(self.current_index)
            .ok_or(PlaybackError::EndOfPlaylist)?;
        self.switch_to(next);
        Ok(())
    }

    /// Skip back
    ///
    /// Past the restart threshold, or on the first track, restarts the
    /// current track. Otherwise selects the previous one.
    pub fn previous(&mut self) {
        if self.elapsed > self.restart_threshold {
            self.seek(Duration::ZERO);
            return;
        }

        match self.playlist.previous_index(self.current_index) {
            Some(previous) => self.switch_to(previous),
            None => self.seek(Duration::ZERO),
        }
    }

    /// Internal: make `index` the active track (index already validated)
    fn switch_to(&mut self, index: usize) {
        let resume = match self.state {
            PlaybackState::Playing => true,
            PlaybackState::Loading => self.resume_after_load,
            PlaybackState::Idle | PlaybackState::Paused => {
                self.select_behavior == SelectBehavior::AutoResume
            }
        };

        let previous_index = self.current_index;
        self.current_index = index;
        self.elapsed = Duration::ZERO;

        tracing::info!(
            "Track {} selected: {} - {}",
            index,
            self.current_track().artist,
            self.current_track().title
        );

        self.load_current();
        self.emit(PlaybackEvent::TrackChanged {
            index,
            previous_index,
        });
        self.emit_position_update();

        if self.wait_for_load {
            self.resume_after_load = resume;
            self.set_state(PlaybackState::Loading);
        } else if resume {
            self.set_state(PlaybackState::Playing);
            let result = self.output.play();
            self.report(result, "play");
        }
    }

    // ===== Time =====

    /// Advance elapsed time by one timer tick
    ///
    /// Ignored unless playing. Reaching the end of the track auto-advances.
    pub fn tick(&mut self, delta: Duration) {
        if self.state != PlaybackState::Playing {
            tracing::trace!("Tick ignored in state {:?}", self.state);
            return;
        }

        self.elapsed = self.elapsed.saturating_add(delta);

        if self.elapsed >= self.duration() {
            self.finish_track();
        } else {
            self.emit_position_update();
        }
    }

    /// Internal: current track reached its end
    fn finish_track(&mut self) {
        let finished = self.current_index;
        tracing::debug!("Track {} finished", finished);
        self.emit(PlaybackEvent::TrackFinished { index: finished });

        if let Some(next) = self.playlist.next_index(finished) {
            self.switch_to(next);
            return;
        }

        // End of playlist: stop and rewind
        tracing::info!("Reached end of playlist");
        self.elapsed = Duration::ZERO;
        let was_playing = self.state == PlaybackState::Playing;
        self.set_state(PlaybackState::Paused);
        if was_playing {
            let result = self.output.pause();
            self.report(result, "pause");
        }
        let result = self.output.set_position(Duration::ZERO);
        self.report(result, "set_position");
        self.emit_position_update();
    }

    // ===== Audio Output Notifications =====

    /// React to a notification from the audio output
    pub fn handle_notification(&mut self, notification: AudioNotification) {
        match notification {
            AudioNotification::Loaded => {
                tracing::debug!("Audio loaded: {}", self.current_track().source);
                if self.state == PlaybackState::Loading {
                    self.finish_loading();
                }
            }
            AudioNotification::Error(message) => {
                tracing::warn!(
                    "Audio error on {}: {}",
                    self.current_track().source,
                    message
                );
                self.emit(PlaybackEvent::AudioError { message });
            }
            AudioNotification::Ended => {
                if self.state == PlaybackState::Loading {
                    // Belongs to the source that was just replaced
                    tracing::debug!("Ignoring end notification while loading");
                    return;
                }
                self.finish_track();
            }
        }
    }

    fn finish_loading(&mut self) {
        if std::mem::take(&mut self.resume_after_load) {
            self.set_state(PlaybackState::Playing);
            let result = self.output.play();
            self.report(result, "play");
        } else {
            self.set_state(PlaybackState::Paused);
        }
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> &Track {
        &self.playlist.tracks()[self.current_index]
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Duration of the active track
    pub fn duration(&self) -> Duration {
        self.current_track().duration
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.elapsed, self.duration())
    }

    /// Progress bar width (0.0-100.0)
    pub fn progress_percent(&self) -> f64 {
        self.progress().percent()
    }

    /// Volume level (0-100)
    pub fn volume(&self) -> f32 {
        self.volume.percent()
    }

    pub fn has_next(&self) -> bool {
        self.playlist.next_index(self.current_index).is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.playlist.previous_index(self.current_index).is_some()
    }

    /// Snapshot of the session record
    pub fn session(&self) -> PlaybackSession {
        PlaybackSession {
            current_track_index: self.current_index,
            state: self.state,
            elapsed: self.elapsed,
            volume_percent: self.volume.percent(),
        }
    }

    // ===== Events =====

    /// Take all pending events (oldest first)
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_position_update(&mut self) {
        let progress = self.progress();
        self.emit(PlaybackEvent::PositionUpdate {
            elapsed_ms: progress.elapsed().as_millis() as u64,
            duration_ms: progress.total().as_millis() as u64,
            percent: progress.percent(),
        });
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }
        tracing::debug!("State {:?} -> {:?}", self.state, state);
        self.state = state;
        self.emit(PlaybackEvent::StateChanged { state });
    }

    // ===== Internal =====

    fn load_current(&mut self) {
        let track = &self.playlist.tracks()[self.current_index];
        let result = self.output.load(track);
        self.report(result, "load");
    }

    /// Audio output faults are logged and surfaced, never propagated
    fn report(&mut self, result: Result<()>, action: &str) {
        if let Err(e) = result {
            tracing::warn!("Audio output {} failed: {}", action, e);
            self.emit(PlaybackEvent::AudioError {
                message: e.to_string(),
            });
        }
    }
}
