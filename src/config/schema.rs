use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/setlist/config.toml` or `~/.config/setlist/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SETLIST__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `playlists.json`. Defaults to the per-user data dir.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// What to do when a track ends.
    pub loop_mode: LoopModeSetting,
    /// Shuffle a playlist when `play` starts.
    pub shuffle: bool,
    /// Initial output volume in `0.0..=1.0`.
    pub volume: f32,
    /// How often the player checks for end-of-track and key presses (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            loop_mode: LoopModeSetting::NoLoop,
            shuffle: false,
            volume: 0.8,
            poll_interval_ms: 200,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopModeSetting {
    #[serde(alias = "no_loop", alias = "off")]
    NoLoop,
    #[serde(alias = "loopall", alias = "loop_all", alias = "repeat-all", alias = "all")]
    LoopAll,
    #[serde(alias = "loopone", alias = "loop_one", alias = "repeat-one", alias = "one")]
    LoopOne,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Which track fields to show in listings and the now-playing line.
    ///
    /// Example: ["artist", "title", "album"]
    pub track_fields: Vec<TrackDisplayField>,
    /// Separator used to join `track_fields`.
    pub separator: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            track_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions accepted on import (case-insensitive, leading dot optional).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while walking directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Derive titles from file names with track numbers and underscores removed.
    pub clean_titles: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "m4a".into(),
                "aac".into(),
                "flac".into(),
            ],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            clean_titles: true,
        }
    }
}
