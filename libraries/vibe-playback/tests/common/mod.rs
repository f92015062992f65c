//! Shared test helpers: recording audio output, manual tick scheduler, tracks

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;
use vibe_playback::{
    AudioOutput, PlaybackConfig, PlaybackController, PlaybackError, Playlist, TickHandle,
    TickScheduler, Track,
};

/// Command observed by the audio output
#[derive(Debug, Clone, PartialEq)]
pub enum OutputCommand {
    Load(String),
    Play,
    Pause,
    SetPosition(Duration),
    SetVolume(f32),
}

/// Audio output that records every command
#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    commands: Arc<Mutex<Vec<OutputCommand>>>,
    failing: Arc<Mutex<bool>>,
}

impl RecordingOutput {
    pub fn take(&self) -> Vec<OutputCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }

    /// Make every following command fail (after recording it)
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn record(&self, command: OutputCommand) -> vibe_playback::Result<()> {
        self.commands.lock().unwrap().push(command);
        if *self.failing.lock().unwrap() {
            return Err(PlaybackError::AudioOutput("device unavailable".to_string()));
        }
        Ok(())
    }
}

impl AudioOutput for RecordingOutput {
    fn load(&mut self, track: &Track) -> vibe_playback::Result<()> {
        self.record(OutputCommand::Load(track.source.clone()))
    }

    fn play(&mut self) -> vibe_playback::Result<()> {
        self.record(OutputCommand::Play)
    }

    fn pause(&mut self) -> vibe_playback::Result<()> {
        self.record(OutputCommand::Pause)
    }

    fn set_position(&mut self, position: Duration) -> vibe_playback::Result<()> {
        self.record(OutputCommand::SetPosition(position))
    }

    fn set_volume(&mut self, volume: f32) -> vibe_playback::Result<()> {
        self.record(OutputCommand::SetVolume(volume))
    }
}

/// Scheduler that only tracks which subscriptions are alive
///
/// Tests inject ticks by hand through `PlayerSession::dispatch`.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    active: Arc<Mutex<Vec<u64>>>,
    scheduled: Arc<Mutex<Vec<(u64, Duration)>>>,
}

impl ManualScheduler {
    pub fn active(&self) -> Vec<u64> {
        self.active.lock().unwrap().clone()
    }

    pub fn scheduled(&self) -> Vec<(u64, Duration)> {
        self.scheduled.lock().unwrap().clone()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, subscription: u64, period: Duration) -> TickHandle {
        self.active.lock().unwrap().push(subscription);
        self.scheduled.lock().unwrap().push((subscription, period));

        let active = Arc::clone(&self.active);
        TickHandle::new(subscription, move || {
            active.lock().unwrap().retain(|id| *id != subscription);
        })
    }
}

pub fn create_track(index: usize, duration_secs: u64) -> Track {
    Track::new(
        format!("Track {}", index),
        format!("Artist {}", index),
        format!("/playlist/{}.mp3", index),
        Duration::from_secs(duration_secs),
    )
}

pub fn create_playlist(durations: &[u64]) -> Playlist {
    let tracks = durations
        .iter()
        .enumerate()
        .map(|(i, secs)| create_track(i, *secs))
        .collect();
    Playlist::new(tracks).unwrap()
}

/// Controller with default config; construction commands are discarded
pub fn create_controller(durations: &[u64]) -> (PlaybackController, RecordingOutput) {
    create_controller_with(durations, &PlaybackConfig::default())
}

pub fn create_controller_with(
    durations: &[u64],
    config: &PlaybackConfig,
) -> (PlaybackController, RecordingOutput) {
    let output = RecordingOutput::default();
    let mut controller =
        PlaybackController::new(create_playlist(durations), config, Box::new(output.clone()));
    output.take();
    controller.drain_events();
    (controller, output)
}
