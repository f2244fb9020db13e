//! Drives an engine from a playlist: plays the current track and decides
//! what comes next when it ends.

use log::{info, warn};

use crate::playlist::Playlist;

use super::types::{LoopMode, PlaybackEngine};

/// What [`Autoplay::tick`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Nothing ended; no change.
    Continue,
    /// The current track started over (`LoopOne`).
    Replayed,
    /// Moved on to the track at this index.
    Advanced(usize),
    /// Went back to the first track after the last (`LoopAll`).
    Wrapped,
    /// Reached the end of the playlist and stopped.
    Stopped,
}

pub struct Autoplay<E> {
    engine: E,
    loop_mode: LoopMode,
}

impl<E: PlaybackEngine> Autoplay<E> {
    pub fn new(engine: E, loop_mode: LoopMode) -> Self {
        Self { engine, loop_mode }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn cycle_loop_mode(&mut self) -> LoopMode {
        self.loop_mode = self.loop_mode.cycle();
        self.loop_mode
    }

    /// Load and start the playlist's current track. Returns `false` when
    /// nothing could be started.
    ///
    /// A track the engine cannot load is skipped: the cursor moves forward
    /// until a track loads or the end is reached.
    pub fn play_current(&mut self, playlist: &mut Playlist) -> bool {
        self.start(playlist, Playlist::next)
    }

    /// Like [`play_current`](Self::play_current), with `skip` choosing the
    /// direction to move past unloadable tracks.
    fn start(&mut self, playlist: &mut Playlist, skip: fn(&mut Playlist) -> bool) -> bool {
        loop {
            let Some(track) = playlist.current_track() else {
                self.stop(playlist);
                return false;
            };

            match self.engine.load(track) {
                Ok(reported) => {
                    if let Some(t) = playlist.current_track_mut() {
                        if reported.is_some() {
                            t.duration = reported;
                        }
                        info!("now playing: {t} ({})", t.format_duration());
                    }
                    playlist.mark_playing(playlist.cursor());
                    return true;
                }
                Err(e) => {
                    warn!("skipping {}: {e}", track.path.display());
                    if !skip(playlist) {
                        self.stop(playlist);
                        return false;
                    }
                }
            }
        }
    }

    /// Move to the next track and play it. Does not wrap.
    pub fn next(&mut self, playlist: &mut Playlist) -> bool {
        playlist.next() && self.start(playlist, Playlist::next)
    }

    /// Move to the previous track and play it. Does not wrap.
    pub fn previous(&mut self, playlist: &mut Playlist) -> bool {
        playlist.previous() && self.start(playlist, Playlist::previous)
    }

    /// Move to `index` and play from there. Out-of-range indices do nothing.
    pub fn jump(&mut self, playlist: &mut Playlist, index: usize) -> bool {
        playlist.go_to_index(index) && self.play_current(playlist)
    }

    pub fn stop(&mut self, playlist: &mut Playlist) {
        self.engine.stop();
        playlist.mark_playing(None);
    }

    /// Poll the engine's end-of-track signal and apply the loop mode.
    pub fn tick(&mut self, playlist: &mut Playlist) -> Advance {
        if !self.engine.is_finished() {
            return Advance::Continue;
        }

        match self.loop_mode {
            LoopMode::LoopOne => {
                if self.play_current(playlist) {
                    Advance::Replayed
                } else {
                    Advance::Stopped
                }
            }
            LoopMode::LoopAll => {
                if self.next(playlist) {
                    Advance::Advanced(playlist.cursor().unwrap_or(0))
                } else if playlist.go_to_index(0) && self.play_current(playlist) {
                    Advance::Wrapped
                } else {
                    self.stop(playlist);
                    Advance::Stopped
                }
            }
            LoopMode::NoLoop => {
                if self.next(playlist) {
                    Advance::Advanced(playlist.cursor().unwrap_or(0))
                } else {
                    self.stop(playlist);
                    Advance::Stopped
                }
            }
        }
    }
}
