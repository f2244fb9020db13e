use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder for title/artist/album when nothing better is known.
pub const UNKNOWN: &str = "Unknown";

/// Star rating clamped into `0..=5`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn set(&mut self, value: i32) {
        *self = Self::new(value);
    }

    pub fn has_rating(self) -> bool {
        self.0 > 0
    }

    pub fn filled_stars(self) -> u8 {
        self.0
    }

    pub fn empty_stars(self) -> u8 {
        Self::MAX - self.0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.filled_stars() {
            f.write_str("★")?;
        }
        for _ in 0..self.empty_stars() {
            f.write_str("☆")?;
        }
        Ok(())
    }
}

/// One playable item. Identity is the file path: two tracks with the same
/// path compare equal regardless of their metadata.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Unknown until the tag reader or the playback engine reports it.
    pub duration: Option<Duration>,
    pub rating: Rating,
    /// Embedded cover image bytes, if the file carried one.
    pub album_art: Option<Vec<u8>>,
    pub playing: bool,
}

impl Track {
    /// A track with only a path; metadata fields hold [`UNKNOWN`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            title: UNKNOWN.to_string(),
            artist: UNKNOWN.to_string(),
            album: UNKNOWN.to_string(),
            duration: None,
            rating: Rating::default(),
            album_art: None,
            playing: false,
        }
    }

    pub fn with_metadata(
        path: impl Into<PathBuf>,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            ..Self::new(path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_rating(&mut self, value: i32) {
        self.rating.set(value);
    }

    /// Duration as `m:ss`, or `0:00` when unknown.
    pub fn format_duration(&self) -> String {
        let total = self.duration.map(|d| d.as_secs()).unwrap_or(0);
        format!("{}:{:02}", total / 60, total % 60)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Track {}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}
