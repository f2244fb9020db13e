//! In-memory [`PlaybackEngine`] for tests.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::library::Track;

use super::types::{PlaybackEngine, PlaybackState};

/// In-memory engine: records loads and lets tests flip the "ended" signal.
#[derive(Default)]
pub(crate) struct FakeEngine {
    pub(crate) loaded: Vec<PathBuf>,
    pub(crate) state: PlaybackState,
    pub(crate) finished: bool,
    pub(crate) volume: f32,
    pub(crate) position: Duration,
    /// Paths whose `load` fails.
    pub(crate) fail_on: Vec<PathBuf>,
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, track: &Track) -> Result<Option<Duration>> {
        if self.fail_on.contains(&track.path) {
            return Err(Error::Audio("cannot decode".into()));
        }
        self.loaded.push(track.path.clone());
        self.state = PlaybackState::Playing;
        self.finished = false;
        self.position = Duration::ZERO;
        Ok(Some(Duration::from_secs(60 * self.loaded.len() as u64)))
    }

    fn play(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.finished = false;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.position = position;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn state(&self) -> PlaybackState {
        self.state
    }

    fn is_finished(&self) -> bool {
        self.state == PlaybackState::Playing && self.finished
    }
}
