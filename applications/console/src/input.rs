//! Console command parsing
//!
//! One command per line. Track numbers are 1-based, as shown by `list`.

use crate::error::{ConsoleError, Result};
use std::time::Duration;
use vibe_playback::Command;

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Forwarded to the playback session
    Playback(Command),

    /// Show the playlist
    List,

    /// Show the current status line
    Status,

    Help,

    Quit,
}

pub const HELP: &str = "\
Commands:
  play | pause | toggle | p    play/pause
  seek <secs | m:ss | N%>      jump within the current track
  vol <0-100>                  set volume
  track <n>                    play track n from the list
  next | n                     skip forward
  prev | b                     skip back or restart the track
  list                         show the playlist
  status                       show the current position
  help                         show this help
  quit | q                     exit";

/// Parse one line of input
///
/// Returns `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    if let Some(extra) = words.next() {
        return Err(ConsoleError::InvalidCommand(format!(
            "unexpected argument '{}'",
            extra
        )));
    }

    let input = match (keyword.to_ascii_lowercase().as_str(), argument) {
        ("play", None) => Input::Playback(Command::Play),
        ("pause", None) => Input::Playback(Command::Pause),
        ("toggle" | "p", None) => Input::Playback(Command::Toggle),
        ("next" | "n", None) => Input::Playback(Command::Next),
        ("prev" | "b", None) => Input::Playback(Command::Previous),
        ("list", None) => Input::List,
        ("status", None) => Input::Status,
        ("help" | "?", None) => Input::Help,
        ("quit" | "q" | "exit", None) => Input::Quit,
        ("seek", Some(target)) => Input::Playback(parse_seek(target)?),
        ("vol" | "volume", Some(level)) => {
            Input::Playback(Command::SetVolume(parse_volume(level)?))
        }
        ("track", Some(number)) => {
            Input::Playback(Command::SelectTrack(parse_track_number(number)?))
        }
        ("seek" | "vol" | "volume" | "track", None) => {
            return Err(ConsoleError::InvalidCommand(format!(
                "'{}' needs an argument",
                keyword
            )));
        }
        (_, Some(_)) if is_bare_keyword(keyword) => {
            return Err(ConsoleError::InvalidCommand(format!(
                "'{}' takes no argument",
                keyword
            )));
        }
        _ => {
            return Err(ConsoleError::InvalidCommand(format!(
                "unknown command '{}' (try 'help')",
                keyword
            )));
        }
    };

    Ok(Some(input))
}

fn is_bare_keyword(keyword: &str) -> bool {
    matches!(
        keyword.to_ascii_lowercase().as_str(),
        "play" | "pause" | "toggle" | "p" | "next" | "n" | "prev" | "b" | "list" | "status"
            | "help" | "?" | "quit" | "q" | "exit"
    )
}

/// `90`, `1:30` or `50%`
fn parse_seek(target: &str) -> Result<Command> {
    if let Some(percent) = target.strip_suffix('%') {
        let percent: f32 = percent
            .parse()
            .map_err(|_| invalid(format!("bad percentage '{}'", target)))?;
        if !percent.is_finite() {
            return Err(invalid(format!("bad percentage '{}'", target)));
        }
        return Ok(Command::SeekPercent(percent));
    }

    parse_clock(target).map(Command::Seek)
}

/// Seconds (`75`, `12.5`) or `m:ss`
fn parse_clock(value: &str) -> Result<Duration> {
    let bad = || invalid(format!("bad position '{}'", value));

    if let Some((minutes, seconds)) = value.split_once(':') {
        let minutes: u64 = minutes.parse().map_err(|_| bad())?;
        let seconds: u64 = seconds.parse().map_err(|_| bad())?;
        if seconds >= 60 {
            return Err(bad());
        }
        let total = minutes
            .checked_mul(60)
            .and_then(|secs| secs.checked_add(seconds))
            .ok_or_else(bad)?;
        return Ok(Duration::from_secs(total));
    }

    let seconds: f64 = value.parse().map_err(|_| bad())?;
    Duration::try_from_secs_f64(seconds).map_err(|_| bad())
}

fn parse_volume(level: &str) -> Result<f32> {
    let level = level.strip_suffix('%').unwrap_or(level);
    match level.parse::<f32>() {
        Ok(percent) if percent.is_finite() => Ok(percent),
        _ => Err(invalid(format!("bad volume '{}'", level))),
    }
}

/// 1-based track number to playlist index
fn parse_track_number(number: &str) -> Result<usize> {
    match number.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(invalid(format!(
            "bad track number '{}' (tracks start at 1)",
            number
        ))),
    }
}

fn invalid(message: String) -> ConsoleError {
    ConsoleError::InvalidCommand(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse(line) {
            Ok(Some(Input::Playback(command))) => command,
            other => panic!("expected playback command for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn parses_transport_commands() {
        assert_eq!(command("p"), Command::Toggle);
        assert_eq!(command("toggle"), Command::Toggle);
        assert_eq!(command("PLAY"), Command::Play);
        assert_eq!(command("pause"), Command::Pause);
        assert_eq!(command("  n "), Command::Next);
        assert_eq!(command("prev"), Command::Previous);
        assert_eq!(command("b"), Command::Previous);
    }

    #[test]
    fn parses_seek_forms() {
        assert_eq!(command("seek 90"), Command::Seek(Duration::from_secs(90)));
        assert_eq!(command("seek 1:05"), Command::Seek(Duration::from_secs(65)));
        assert_eq!(
            command("seek 12.5"),
            Command::Seek(Duration::from_millis(12_500))
        );
        assert_eq!(command("seek 50%"), Command::SeekPercent(50.0));
    }

    #[test]
    fn rejects_bad_seek_targets() {
        assert!(parse("seek").is_err());
        assert!(parse("seek 1:75").is_err());
        assert!(parse("seek -3").is_err());
        assert!(parse("seek abc%").is_err());
        assert!(parse("seek soon").is_err());
        assert!(parse("seek 999999999999999999:00").is_err());
        assert!(parse("seek 1e300").is_err());
    }

    #[test]
    fn track_numbers_are_one_based() {
        assert_eq!(command("track 1"), Command::SelectTrack(0));
        assert_eq!(command("track 6"), Command::SelectTrack(5));
        assert!(parse("track 0").is_err());
        assert!(parse("track -1").is_err());
    }

    #[test]
    fn volume_accepts_out_of_range_values() {
        // Clamping is the controller's job
        assert_eq!(command("vol 150"), Command::SetVolume(150.0));
        assert_eq!(command("volume 35%"), Command::SetVolume(35.0));
        assert!(parse("vol loud").is_err());
        assert!(parse("vol NaN").is_err());
    }

    #[test]
    fn parses_console_commands() {
        assert_eq!(parse("list").unwrap(), Some(Input::List));
        assert_eq!(parse("status").unwrap(), Some(Input::Status));
        assert_eq!(parse("help").unwrap(), Some(Input::Help));
        assert_eq!(parse("q").unwrap(), Some(Input::Quit));
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn rejects_unknown_and_malformed_lines() {
        assert!(matches!(
            parse("shuffle"),
            Err(ConsoleError::InvalidCommand(_))
        ));
        assert!(parse("pause now").is_err());
        assert!(parse("seek 10 20").is_err());
    }
}
