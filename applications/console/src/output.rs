//! Simulated audio output
//!
//! Logs every command instead of producing sound. Loads answer immediately
//! through the session, the way a media element fires `loadeddata` or
//! `error`.

use std::time::Duration;
use vibe_playback::{AudioNotification, AudioOutput, SessionHandle, Track};

pub struct ConsoleOutput {
    session: SessionHandle,
}

impl ConsoleOutput {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    fn notify(&self, notification: AudioNotification) -> vibe_playback::Result<()> {
        self.session.notify(notification)
    }
}

impl AudioOutput for ConsoleOutput {
    fn load(&mut self, track: &Track) -> vibe_playback::Result<()> {
        tracing::debug!("Audio load: {}", track.source);

        if track.source.trim().is_empty() {
            return self.notify(AudioNotification::Error(format!(
                "no source for '{}'",
                track.title
            )));
        }

        self.notify(AudioNotification::Loaded)
    }

    fn play(&mut self) -> vibe_playback::Result<()> {
        tracing::debug!("Audio play");
        Ok(())
    }

    fn pause(&mut self) -> vibe_playback::Result<()> {
        tracing::debug!("Audio pause");
        Ok(())
    }

    fn set_position(&mut self, position: Duration) -> vibe_playback::Result<()> {
        tracing::debug!("Audio position: {:?}", position);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> vibe_playback::Result<()> {
        tracing::debug!("Audio volume: {:.2}", volume);
        Ok(())
    }
}
