//! Playback: the engine trait the rest of the crate talks to, a rodio-backed
//! engine, and the driver that advances a playlist when a track ends.

mod autoplay;
mod engine;
#[cfg(test)]
pub(crate) mod fake;
mod sink;
mod types;

pub use autoplay::{Advance, Autoplay};
pub use engine::RodioEngine;
pub use types::{LoopMode, PlaybackEngine, PlaybackState};
