//! Named playlists of local audio files: an ordered sequencer with a cursor,
//! a tolerant on-disk format, and a small terminal player on top.

pub mod config;
pub mod error;
pub mod library;
pub mod playback;
pub mod playlist;
pub mod runtime;
pub mod storage;

pub use error::{Error, Result};
