use std::time::Duration;

use log::debug;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::error::{Error, Result};
use crate::library::Track;

use super::sink::create_sink;
use super::types::{PlaybackEngine, PlaybackState};

/// [`PlaybackEngine`] on the default audio output device.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
    state: PlaybackState,
}

impl RodioEngine {
    pub fn open(volume: f32) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Audio(format!("no audio output device: {e}")))?;
        // rodio logs to stderr when the stream is dropped.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            volume: volume.clamp(0.0, 1.0),
            state: PlaybackState::Stopped,
        })
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, track: &Track) -> Result<Option<Duration>> {
        self.stop();

        let (sink, total) = create_sink(&self.stream, &track.path)?;
        sink.set_volume(self.volume);
        sink.play();
        self.sink = Some(sink);
        self.state = PlaybackState::Playing;

        debug!("loaded {}", track.path.display());
        Ok(total.or(track.duration))
    }

    fn play(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
            self.state = PlaybackState::Playing;
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
            self.state = PlaybackState::Paused;
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.state = PlaybackState::Stopped;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        let Some(s) = self.sink.as_ref() else {
            return Ok(());
        };
        s.try_seek(position)
            .map_err(|e| Error::Audio(format!("seek failed: {e}")))
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|s| s.get_pos())
            .unwrap_or(Duration::ZERO)
    }

    fn state(&self) -> PlaybackState {
        self.state
    }

    fn is_finished(&self) -> bool {
        self.state == PlaybackState::Playing && self.sink.as_ref().is_some_and(|s| s.empty())
    }
}
