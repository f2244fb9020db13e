//! Utilities for creating `rodio` sinks from track files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` ready to play from the start.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

/// Create a paused `Sink` for the file at `path`, along with the decoder's
/// total duration when it can tell.
pub(super) fn create_sink(stream: &OutputStream, path: &Path) -> Result<(Sink, Option<Duration>)> {
    let file = File::open(path)
        .map_err(|e| Error::Audio(format!("failed to open {}: {e}", path.display())))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| Error::Audio(format!("failed to decode {}: {e}", path.display())))?;
    let total = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
