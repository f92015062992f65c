//! Playback session event loop
//!
//! Serializes user commands, timer ticks and audio notifications into one
//! ordered stream and applies them to the [`PlaybackController`] one at a
//! time. The session owns the tick subscription: it exists exactly while the
//! controller is playing and is torn down when the session ends.

use crate::{
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    output::AudioNotification,
    scheduler::{TickHandle, TickScheduler, TokioTickScheduler},
    types::PlaybackSession,
};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// User commands accepted by a session
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Play/pause button
    Toggle,

    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Seek to position
    Seek(Duration),

    /// Seek to a percentage of the track (progress bar click)
    SeekPercent(f32),

    /// Set volume (0-100)
    SetVolume(f32),

    /// Select track by playlist index
    SelectTrack(usize),

    /// Skip forward
    Next,

    /// Skip back
    Previous,

    /// Stop the event loop
    Shutdown,
}

/// Everything that can happen to a session
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Command(Command),

    /// Timer tick from subscription `subscription`
    Tick { subscription: u64, delta: Duration },

    /// Notification from the audio output
    Audio(AudioNotification),
}

/// Receiving side of a session channel
pub type SessionReceiver = UnboundedReceiver<PlayerEvent>;

/// Create a session channel
pub fn channel() -> (SessionHandle, SessionReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SessionHandle { tx }, rx)
}

/// Cloneable sender for a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<PlayerEvent>,
}

impl SessionHandle {
    pub fn send(&self, command: Command) -> Result<()> {
        self.post(PlayerEvent::Command(command))
    }

    pub fn toggle(&self) -> Result<()> {
        self.send(Command::Toggle)
    }

    pub fn seek(&self, position: Duration) -> Result<()> {
        self.send(Command::Seek(position))
    }

    pub fn seek_to_percent(&self, percent: f32) -> Result<()> {
        self.send(Command::SeekPercent(percent))
    }

    pub fn set_volume(&self, percent: f32) -> Result<()> {
        self.send(Command::SetVolume(percent))
    }

    pub fn select_track(&self, index: usize) -> Result<()> {
        self.send(Command::SelectTrack(index))
    }

    pub fn next(&self) -> Result<()> {
        self.send(Command::Next)
    }

    pub fn previous(&self) -> Result<()> {
        self.send(Command::Previous)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    /// Forward a notification from the audio output
    pub fn notify(&self, notification: AudioNotification) -> Result<()> {
        self.post(PlayerEvent::Audio(notification))
    }

    /// Tick scheduler delivering into this session
    pub fn tick_scheduler(&self) -> TokioTickScheduler {
        TokioTickScheduler::new(&self.tx)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn post(&self, event: PlayerEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| PlaybackError::SessionClosed)
    }
}

/// Single-threaded playback session
pub struct PlayerSession<S: TickScheduler> {
    controller: PlaybackController,
    scheduler: S,
    tick_interval: Duration,
    ticker: Option<TickHandle>,
    next_subscription: u64,
    event_sink: Option<UnboundedSender<PlaybackEvent>>,
}

impl<S: TickScheduler> PlayerSession<S> {
    pub fn new(
        controller: PlaybackController,
        scheduler: S,
        tick_interval: Duration,
    ) -> Result<Self> {
        if tick_interval.is_zero() {
            return Err(PlaybackError::InvalidConfig(
                "tick interval must be greater than zero".to_string(),
            ));
        }

        let mut session = Self {
            controller,
            scheduler,
            tick_interval,
            ticker: None,
            next_subscription: 0,
            event_sink: None,
        };
        session.reconcile_ticker();
        Ok(session)
    }

    /// Forward controller events to `sink` after every dispatched event
    pub fn with_event_sink(mut self, sink: UnboundedSender<PlaybackEvent>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Whether a tick subscription is active
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Apply one event
    ///
    /// Returns `false` once the session has been asked to shut down.
    pub fn dispatch(&mut self, event: PlayerEvent) -> bool {
        match event {
            PlayerEvent::Command(Command::Shutdown) => {
                tracing::info!("Shutdown requested");
                self.stop_ticker();
                self.forward_events();
                return false;
            }
            PlayerEvent::Command(command) => self.apply(command),
            PlayerEvent::Tick {
                subscription,
                delta,
            } => {
                if self.ticker.as_ref().map(TickHandle::subscription) == Some(subscription) {
                    self.controller.tick(delta);
                } else {
                    tracing::trace!("Discarding stale tick from subscription {}", subscription);
                }
            }
            PlayerEvent::Audio(notification) => self.controller.handle_notification(notification),
        }

        self.reconcile_ticker();
        self.forward_events();
        true
    }

    /// Process events until shutdown or until every handle is dropped
    ///
    /// Returns the final session snapshot.
    pub async fn run(mut self, mut events: SessionReceiver) -> PlaybackSession {
        tracing::info!(
            "Playback session started ({} tracks)",
            self.controller.playlist().len()
        );

        while let Some(event) = events.recv().await {
            if !self.dispatch(event) {
                break;
            }
        }

        self.stop_ticker();
        tracing::info!("Playback session ended");
        self.controller.session()
    }

    fn apply(&mut self, command: Command) {
        tracing::debug!("Command: {:?}", command);

        match command {
            Command::Toggle => self.controller.toggle(),
            Command::Play => self.controller.play(),
            Command::Pause => self.controller.pause(),
            Command::Seek(position) => self.controller.seek(position),
            Command::SeekPercent(percent) => self.controller.seek_to_percent(percent),
            Command::SetVolume(percent) => self.controller.set_volume(percent),
            Command::SelectTrack(index) => {
                // Rejected selections are already logged by the controller
                let _ = self.controller.select_track(index);
            }
            Command::Next => {
                if let Err(e) = self.controller.next() {
                    tracing::debug!("Skip forward ignored: {}", e);
                }
            }
            Command::Previous => self.controller.previous(),
            Command::Shutdown => {}
        }
    }

    /// Subscribe while playing, cancel otherwise
    fn reconcile_ticker(&mut self) {
        let playing = self.controller.is_playing();

        if playing && self.ticker.is_none() {
            self.next_subscription += 1;
            let handle = self
                .scheduler
                .schedule(self.next_subscription, self.tick_interval);
            self.ticker = Some(handle);
        } else if !playing {
            self.stop_ticker();
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.cancel();
        }
    }

    fn forward_events(&mut self) {
        let events = self.controller.drain_events();

        let Some(sink) = &self.event_sink else {
            return;
        };

        let delivered = events.into_iter().all(|event| {
            tracing::trace!("Forwarding {}", event.name());
            sink.send(event).is_ok()
        });
        if !delivered {
            tracing::debug!("Event sink closed, no longer forwarding events");
            self.event_sink = None;
        }
    }
}
