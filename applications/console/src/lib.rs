//! Vibe Console Library
//!
//! Terminal front-end for the Vibe Player playback model: configuration,
//! command parsing, a simulated audio output and status rendering.
//!
//! This library exposes the front-end components for testing purposes.

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod render;
pub mod repl;

// Re-export commonly used types for convenience
pub use crate::config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use input::Input;
pub use output::ConsoleOutput;
pub use render::StatusView;
