/// Console configuration
use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vibe_playback::{PlaybackConfig, Playlist, Track};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "vibe.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_playlist")]
    pub playlist: Vec<Track>,
}

impl ConsoleConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `vibe.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (VIBE__PLAYBACK__VOLUME=40)
        settings = settings.add_source(
            config::Environment::with_prefix("VIBE")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.tick_interval_ms == 0 {
            return Err(ConsoleError::Config(
                "playback.tick_interval_ms must be greater than zero".to_string(),
            ));
        }

        if !self.playback.volume.is_finite() {
            return Err(ConsoleError::Config(
                "playback.volume must be a number between 0 and 100".to_string(),
            ));
        }

        for (i, track) in self.playlist.iter().enumerate() {
            if track.source.trim().is_empty() {
                tracing::warn!(
                    "Track {} ({}) has no source; loading it will fail",
                    i + 1,
                    track.title
                );
            }
        }

        Ok(())
    }

    /// Build the validated playlist
    pub fn build_playlist(&self) -> Result<Playlist> {
        Playlist::new(self.playlist.clone())
            .map_err(|e| ConsoleError::Config(format!("playlist: {}", e)))
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            playlist: default_playlist(),
        }
    }
}

// Default values
fn default_playlist() -> Vec<Track> {
    [
        ("The Scientist", "Coldplay", 316),
        ("Bring Me To Life", "Evanescence", 236),
        ("The Reason", "Hoobastank", 232),
        ("In The End", "Linkin Park", 216),
        ("25 Minutes", "Michael Learns To Rock", 240),
        ("Welcome To The Black Parade", "My Chemical Romance", 311),
    ]
    .into_iter()
    .map(|(title, artist, secs)| {
        Track::new(
            title,
            artist,
            format!("/playlist/{} - {}.mp3", artist, file_title(title)),
            Duration::from_secs(secs),
        )
    })
    .collect()
}

/// File names on disk differ from display titles in letter case
fn file_title(title: &str) -> &str {
    match title {
        "In The End" => "In the End",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use vibe_playback::SelectBehavior;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vibe.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn default_playlist_matches_bundled_songs() {
        let config = ConsoleConfig::default();
        assert_eq!(config.playlist.len(), 6);

        let total: u64 = config.playlist.iter().map(|t| t.duration.as_secs()).sum();
        assert_eq!(total, 316 + 236 + 232 + 216 + 240 + 311);

        assert_eq!(
            config.playlist[3].source,
            "/playlist/Linkin Park - In the End.mp3"
        );
        assert_eq!(
            config.playlist[0].source,
            "/playlist/Coldplay - The Scientist.mp3"
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.build_playlist().unwrap().len(), 6);
    }

    #[test]
    fn load_playback_settings_from_file() {
        let (_dir, path) = write_config(
            r#"
[playback]
volume = 40
tick_interval_ms = 250
select_behavior = "auto_resume"
wait_for_load = true
"#,
        );

        let config = ConsoleConfig::load(Some(&path)).unwrap();

        assert_eq!(config.playback.volume, 40.0);
        assert_eq!(config.playback.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.playback.select_behavior, SelectBehavior::AutoResume);
        assert!(config.playback.wait_for_load);
        // Playlist falls back to the bundled songs
        assert_eq!(config.playlist.len(), 6);
    }

    #[test]
    fn load_playlist_from_file() {
        let (_dir, path) = write_config(
            r#"
[[playlist]]
title = "Intro"
artist = "Someone"
source = "/music/intro.mp3"
duration_secs = 90

[[playlist]]
title = "Outro"
artist = "Someone"
source = "/music/outro.mp3"
duration_secs = 125.5
"#,
        );

        let config = ConsoleConfig::load(Some(&path)).unwrap();
        let playlist = config.build_playlist().unwrap();

        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.tracks()[0].duration, Duration::from_secs(90));
        assert_eq!(playlist.tracks()[1].duration, Duration::from_millis(125_500));
        assert_eq!(config.playback.volume, 70.0);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        assert!(matches!(
            ConsoleConfig::load(Some(&path)),
            Err(ConsoleError::Config(_))
        ));
    }

    #[test]
    fn empty_playlist_is_rejected() {
        let config = ConsoleConfig {
            playlist: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.build_playlist(),
            Err(ConsoleError::Config(_))
        ));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let mut config = ConsoleConfig::default();
        config.playback.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
