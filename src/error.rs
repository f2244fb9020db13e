//! Crate-wide error type.
//!
//! Parse failures and read failures never show up here: the codec and the
//! store recover from those locally. What remains are failures a caller has
//! to decide about (writes, validation, audio output).

use std::path::PathBuf;

use thiserror::Error;

use crate::playlist::NameError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The playlist name failed validation; nothing was written.
    #[error("invalid playlist name: {0}")]
    InvalidName(#[from] NameError),

    /// Another stored playlist already uses this name (case-insensitive).
    #[error("a playlist named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("no playlist named \"{0}\"")]
    NotFound(String),

    /// A 1-based track position outside the playlist.
    #[error("no track at position {position} (playlist has {len})")]
    InvalidPosition { position: usize, len: usize },

    /// Writing the storage root failed. Not retried.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the storage root failed; nothing was written.
    #[error("failed to encode playlists: {0}")]
    Encode(#[from] serde_json::Error),

    /// Output device or decoder failure.
    #[error("audio error: {0}")]
    Audio(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
