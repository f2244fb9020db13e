//! Persistence of playlists: the text codec and the file-backed store.

mod codec;
mod service;

pub use codec::{decode, encode};
pub use service::{PLAYLISTS_FILE, PlaylistStore};
