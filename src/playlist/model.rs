//! The playback sequencer: an ordered, named list of tracks plus a cursor.
//!
//! The cursor is the only state. It is `None` exactly when the list is
//! empty, and otherwise always points at a valid index.

use std::path::Path;
use std::sync::mpsc::Receiver;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::library::Track;

use super::events::{PlaylistEvent, Subscribers};

#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    tracks: Vec<Track>,
    cursor: Option<usize>,
    subscribers: Subscribers,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
            cursor: None,
            subscribers: Subscribers::default(),
        }
    }

    /// Build a playlist from already-ordered tracks; the cursor starts on the
    /// first one.
    pub fn with_tracks(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let cursor = if tracks.is_empty() { None } else { Some(0) };
        Self {
            name: name.into(),
            tracks,
            cursor,
            subscribers: Subscribers::default(),
        }
    }

    /// Receive every change made to this playlist from now on.
    pub fn subscribe(&mut self) -> Receiver<PlaylistEvent> {
        self.subscribers.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        let to = name.into();
        if to == self.name {
            return;
        }
        let from = std::mem::replace(&mut self.name, to.clone());
        self.subscribers.emit(PlaylistEvent::Renamed { from, to });
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.tracks.iter().any(|t| t.path == path)
    }

    fn set_cursor(&mut self, to: Option<usize>) {
        if self.cursor != to {
            let from = self.cursor;
            self.cursor = to;
            self.subscribers.emit(PlaylistEvent::CursorMoved { from, to });
        }
    }

    /// Append a track. The first track added to an empty list becomes current.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
        let index = self.tracks.len() - 1;
        self.subscribers.emit(PlaylistEvent::TrackAdded { index });
        if self.cursor.is_none() {
            self.set_cursor(Some(0));
        }
    }

    pub fn add_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) {
        for t in tracks {
            self.add_track(t);
        }
    }

    /// Remove the first track with the same path as `track`.
    pub fn remove_track(&mut self, track: &Track) -> Option<Track> {
        let index = self.tracks.iter().position(|t| t == track)?;
        self.remove_at(index)
    }

    /// Remove the track at `index`, keeping the cursor on the same logical
    /// track when an earlier one is removed.
    ///
    /// Removing the current track leaves the cursor on whatever slid into its
    /// place, clamped to the new end of the list.
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }
        let removed = self.tracks.remove(index);
        self.subscribers.emit(PlaylistEvent::TrackRemoved { index });

        let mut cursor = self.cursor;
        if let Some(c) = cursor {
            if index < c && c > 0 {
                cursor = Some(c - 1);
            }
        }
        cursor = match cursor {
            _ if self.tracks.is_empty() => None,
            Some(c) if c >= self.tracks.len() => Some(self.tracks.len() - 1),
            other => other,
        };
        self.set_cursor(cursor);

        Some(removed)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.subscribers.emit(PlaylistEvent::Cleared);
        self.set_cursor(None);
    }

    /// Randomize the order. The current track moves to the front and the
    /// cursor is reset to it.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.tracks.is_empty() {
            return;
        }
        let current = self.cursor.map(|c| self.tracks.remove(c));
        self.tracks.shuffle(rng);
        if let Some(t) = current {
            self.tracks.insert(0, t);
        }
        self.subscribers.emit(PlaylistEvent::Shuffled);
        self.set_cursor(Some(0));
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.cursor.and_then(|c| self.tracks.get(c))
    }

    pub fn current_track_mut(&mut self) -> Option<&mut Track> {
        self.cursor.and_then(|c| self.tracks.get_mut(c))
    }

    /// Flag the track at `index` as playing and clear the flag everywhere else.
    pub fn mark_playing(&mut self, index: Option<usize>) {
        for (i, t) in self.tracks.iter_mut().enumerate() {
            t.playing = Some(i) == index;
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.tracks.len())
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    /// Advance by one. Returns `false` (and does nothing) at the end.
    pub fn next(&mut self) -> bool {
        match self.cursor {
            Some(c) if c + 1 < self.tracks.len() => {
                self.set_cursor(Some(c + 1));
                true
            }
            _ => false,
        }
    }

    /// Step back by one. Returns `false` (and does nothing) at the start.
    pub fn previous(&mut self) -> bool {
        match self.cursor {
            Some(c) if c > 0 => {
                self.set_cursor(Some(c - 1));
                true
            }
            _ => false,
        }
    }

    /// Jump to `index` if it is in bounds; otherwise leave the cursor alone.
    pub fn go_to_index(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.set_cursor(Some(index));
            true
        } else {
            false
        }
    }
}
