//! Playback-related small types and the engine trait.
//!
//! The engine is whatever turns a track's file into sound. The rest of the
//! crate only talks to it through [`PlaybackEngine`].

use std::time::Duration;

use crate::config::LoopModeSetting;
use crate::error::Result;
use crate::library::Track;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop after the last track.
    #[default]
    NoLoop,
    /// Wrap around to the first track after the last one.
    LoopAll,
    /// Repeat the current track when it ends.
    LoopOne,
}

impl LoopMode {
    /// `NoLoop -> LoopAll -> LoopOne -> NoLoop`.
    pub fn cycle(self) -> Self {
        match self {
            LoopMode::NoLoop => LoopMode::LoopAll,
            LoopMode::LoopAll => LoopMode::LoopOne,
            LoopMode::LoopOne => LoopMode::NoLoop,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoopMode::NoLoop => "no loop",
            LoopMode::LoopAll => "loop all",
            LoopMode::LoopOne => "loop one",
        }
    }
}

impl From<LoopModeSetting> for LoopMode {
    fn from(setting: LoopModeSetting) -> Self {
        match setting {
            LoopModeSetting::NoLoop => LoopMode::NoLoop,
            LoopModeSetting::LoopAll => LoopMode::LoopAll,
            LoopModeSetting::LoopOne => LoopMode::LoopOne,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Something that can play one track at a time.
pub trait PlaybackEngine {
    /// Replace whatever is loaded with `track` and start playing it.
    /// Returns the total duration when the decoder knows it.
    fn load(&mut self, track: &Track) -> Result<Option<Duration>>;

    fn play(&mut self);

    fn pause(&mut self);

    /// Unload the current track.
    fn stop(&mut self);

    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set output volume; values are clamped into `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    fn volume(&self) -> f32;

    /// Elapsed time in the current track.
    fn position(&self) -> Duration;

    fn state(&self) -> PlaybackState;

    /// The loaded track played through to its end.
    fn is_finished(&self) -> bool;

    fn toggle_pause(&mut self) {
        match self.state() {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
            PlaybackState::Stopped => {}
        }
    }
}
