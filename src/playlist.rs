//! Playlists: the sequencer that decides what plays next, the change events
//! it emits, and playlist name rules.

mod events;
mod model;
mod validate;

pub use events::PlaylistEvent;
pub use model::Playlist;
pub use validate::{
    INVALID_NAME_CHARS, MAX_PLAYLIST_NAME_LEN, NameError, is_valid_playlist_name,
    sanitize_file_name, validate_playlist_name,
};
