//! Interactive front-end loop
//!
//! Reads commands line by line, forwards playback commands to the session and
//! prints player events as they arrive.
//!
//! Input lines come through a channel so the blocking stdin reader can live on
//! its own thread and never hold up runtime shutdown.

use crate::error::Result;
use crate::input::{self, Input, HELP};
use crate::render::StatusView;
use std::io::{BufRead, Write};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use vibe_playback::{PlaybackEvent, SessionHandle};

/// Run until `quit`, end of input or session shutdown
///
/// Asks the session to shut down before returning.
pub async fn run<W: Write>(
    mut lines: UnboundedReceiver<String>,
    out: &mut W,
    session: SessionHandle,
    mut view: StatusView,
    mut events: UnboundedReceiver<PlaybackEvent>,
) -> Result<()> {
    writeln!(out, "{}", view.status_line())?;
    writeln!(out, "Type 'help' for commands.")?;

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    tracing::debug!("Input closed");
                    break;
                };

                match input::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Input::Playback(command))) => {
                        if session.send(command).is_err() {
                            tracing::warn!("Session closed, dropping command");
                            break;
                        }
                    }
                    Ok(Some(Input::List)) => writeln!(out, "{}", view.playlist_listing())?,
                    Ok(Some(Input::Status)) => writeln!(out, "{}", view.status_line())?,
                    Ok(Some(Input::Help)) => writeln!(out, "{}", HELP)?,
                    Ok(Some(Input::Quit)) => break,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            event = events.recv() => {
                let Some(event) = event else {
                    tracing::debug!("Session stopped forwarding events");
                    break;
                };

                if let Some(line) = view.apply(&event) {
                    writeln!(out, "{}", line)?;
                }
            }
        }
    }

    // Already closed if the session went away first
    let _ = session.shutdown();
    Ok(())
}

/// Read lines from `reader` on a dedicated thread
pub fn spawn_line_reader<R>(reader: R) -> UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    rx
}
