//! Vibe Player - Playback State & Progress
//!
//! Platform-agnostic playback model for Vibe Player.
//!
//! This crate provides:
//! - Playback state machine (idle, loading, playing, paused)
//! - Track selection, skip forward/back and auto-advance on track end
//! - Elapsed-time bookkeeping driven by timer ticks
//! - Progress derivation (percent, `m:ss` clocks)
//! - Volume control (0-100%, clamped)
//! - Tick scheduling with cancellation handles
//! - Single-threaded session event loop
//!
//! # Architecture
//!
//! `vibe-playback` never produces sound itself. The component that does (a
//! browser media element, a native player) is plugged in through the
//! [`AudioOutput`] trait and reports back with [`AudioNotification`]s.
//!
//! # Example: Controller
//!
//! ```rust
//! use vibe_playback::{AudioOutput, PlaybackConfig, PlaybackController, Playlist, Result, Track};
//! use std::time::Duration;
//!
//! struct SilentOutput;
//!
//! impl AudioOutput for SilentOutput {
//!     fn load(&mut self, _track: &Track) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_position(&mut self, _position: Duration) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: f32) -> Result<()> { Ok(()) }
//! }
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("In The End", "Linkin Park", "/in-the-end.mp3", Duration::from_secs(216)),
//!     Track::new("The Reason", "Hoobastank", "/the-reason.mp3", Duration::from_secs(232)),
//! ])
//! .unwrap();
//!
//! let mut controller =
//!     PlaybackController::new(playlist, &PlaybackConfig::default(), Box::new(SilentOutput));
//!
//! controller.toggle();
//! controller.tick(Duration::from_secs(216));
//!
//! assert_eq!(controller.current_index(), 1);
//! assert!(controller.is_playing());
//! ```
//!
//! # Example: Session
//!
//! ```rust,no_run
//! # use vibe_playback::{PlaybackConfig, PlaybackController, PlayerSession};
//! # async fn demo(controller: PlaybackController) -> vibe_playback::Result<()> {
//! let (handle, events) = vibe_playback::session::channel();
//! let session = PlayerSession::new(
//!     controller,
//!     handle.tick_scheduler(),
//!     PlaybackConfig::default().tick_interval(),
//! )?;
//!
//! handle.toggle()?;
//! handle.shutdown()?;
//! let final_state = session.run(events).await;
//! # let _ = final_state;
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
mod events;
mod output;
mod playlist;
mod progress;
mod scheduler;
pub mod session;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use output::{AudioNotification, AudioOutput};
pub use playlist::Playlist;
pub use progress::{format_clock, Progress};
pub use scheduler::{TickHandle, TickScheduler, TokioTickScheduler};
pub use session::{Command, PlayerEvent, PlayerSession, SessionHandle};
pub use types::{PlaybackConfig, PlaybackSession, PlaybackState, SelectBehavior, Track};
pub use volume::Volume;
