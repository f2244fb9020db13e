use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::playlist::{Playlist, validate_playlist_name};

use super::codec::{decode, encode};

/// File name of the storage root inside the data directory.
pub const PLAYLISTS_FILE: &str = "playlists.json";

/// Playlists persisted in a single document on disk.
///
/// Every operation reads the whole root and, when it changes something,
/// rewrites it. Writes are plain overwrites.
///
/// Name matching is deliberately uneven, mirroring long-standing behavior:
/// [`exists`](Self::exists) compares case-insensitively, while
/// [`save`](Self::save), [`get`](Self::get) and [`delete`](Self::delete) match
/// names exactly.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    file: PathBuf,
}

impl PlaylistStore {
    /// Open the store in `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        if let Err(e) = fs::create_dir_all(dir) {
            warn!("could not create {}: {e}", dir.display());
        }
        Self {
            file: dir.join(PLAYLISTS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Every stored playlist, in file order. Missing or unreadable files
    /// count as "nothing saved yet".
    pub fn load(&self) -> Vec<Playlist> {
        match fs::read_to_string(&self.file) {
            Ok(text) => decode(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("could not read {}: {e}", self.file.display());
                Vec::new()
            }
        }
    }

    fn write(&self, playlists: &[Playlist]) -> Result<()> {
        let text = encode(playlists)?;
        fs::write(&self.file, text).map_err(|source| Error::Write {
            path: self.file.clone(),
            source,
        })
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<Playlist> {
        self.load().into_iter().find(|p| p.name() == name)
    }

    /// Case-insensitive check across all stored playlists.
    pub fn exists(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.load()
            .iter()
            .any(|p| p.name().to_lowercase() == wanted)
    }

    /// Replace the stored playlist with exactly this name, or append it.
    ///
    /// Surrounding whitespace is trimmed from the name before it is matched
    /// and stored, as [`create`](Self::create) and [`rename`](Self::rename) do.
    pub fn save(&self, playlist: &Playlist) -> Result<()> {
        let name = playlist.name().trim();
        validate_playlist_name(name)?;
        let mut stored = playlist.clone();
        stored.rename(name);

        let mut all = self.load();
        match all.iter_mut().find(|p| p.name() == name) {
            Some(slot) => *slot = stored,
            None => all.push(stored),
        }
        self.write(&all)?;
        info!("saved playlist \"{name}\" ({} tracks)", playlist.len());
        Ok(())
    }

    /// Create and persist an empty playlist. Fails if the name is invalid or
    /// already taken (ignoring case).
    pub fn create(&self, name: &str) -> Result<Playlist> {
        let name = name.trim();
        validate_playlist_name(name)?;
        if self.exists(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let playlist = Playlist::new(name);
        self.save(&playlist)?;
        Ok(playlist)
    }

    /// Remove every playlist named exactly `name`. Returns whether one was
    /// found; the file is only rewritten in that case.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut all = self.load();
        let before = all.len();
        all.retain(|p| p.name() != name);
        if all.len() == before {
            return Ok(false);
        }
        self.write(&all)?;
        info!("deleted playlist \"{name}\"");
        Ok(true)
    }

    /// Rename a stored playlist in place, keeping its position and tracks.
    ///
    /// A change of case only (`mix` to `Mix`) is allowed.
    pub fn rename(&self, old: &str, new: &str) -> Result<Playlist> {
        let new = new.trim();
        validate_playlist_name(new)?;

        let mut all = self.load();
        let new_lower = new.to_lowercase();
        if all
            .iter()
            .any(|p| p.name() != old && p.name().to_lowercase() == new_lower)
        {
            return Err(Error::DuplicateName(new.to_string()));
        }

        let Some(slot) = all.iter_mut().find(|p| p.name() == old) else {
            return Err(Error::NotFound(old.to_string()));
        };
        slot.rename(new);
        let renamed = slot.clone();

        self.write(&all)?;
        info!("renamed playlist \"{old}\" to \"{new}\"");
        Ok(renamed)
    }
}
