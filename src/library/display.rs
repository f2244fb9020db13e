use crate::config::TrackDisplayField;

use super::model::{Track, UNKNOWN};

fn known(value: &str) -> Option<&str> {
    let v = value.trim();
    if v.is_empty() || v == UNKNOWN {
        None
    } else {
        Some(v)
    }
}

/// Build a display string for a track according to the provided `fields` and separator.
///
/// Fields holding the [`UNKNOWN`] placeholder are skipped. Falls back to the
/// title (or the file name) when no parts were produced.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackDisplayField::Title => {
                if let Some(t) = known(&track.title) {
                    parts.push(t.to_string());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = known(&track.artist) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = known(&track.album) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = track.path.file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            TrackDisplayField::Path => {
                parts.push(track.path.display().to_string());
            }
        }
    }

    if !parts.is_empty() {
        return parts.join(sep);
    }
    match track.path.file_name().and_then(|s| s.to_str()) {
        Some(name) if known(&track.title).is_none() => name.to_string(),
        _ => track.title.clone(),
    }
}

impl Track {
    /// Convenience wrapper over [`display_from_fields`].
    pub fn display_with(&self, fields: &[TrackDisplayField], sep: &str) -> String {
        display_from_fields(self, fields, sep)
    }
}
