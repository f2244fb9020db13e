use std::path::Path;

use lofty::prelude::*;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Turn a file stem like `01_-_Some_Song` into `Some Song`.
///
/// Underscores become spaces, dashes get spaced out, and a leading one- or
/// two-digit track number followed by `.`, `-` or whitespace is dropped.
pub fn clean_title(stem: &str) -> String {
    let spaced = stem.replace('_', " ").replace('-', " - ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    let digits = collapsed.chars().take_while(|c| c.is_ascii_digit()).count();
    let rest = &collapsed[digits..];
    let stripped = rest.trim_start_matches(|c: char| c == '.' || c == '-' || c.is_whitespace());

    if (1..=2).contains(&digits) && stripped.len() < rest.len() && !stripped.is_empty() {
        stripped.to_string()
    } else {
        collapsed
    }
}

fn non_blank(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Build a `Track` for a single audio file, reading embedded tags when possible.
pub fn track_from_file(path: &Path, settings: &LibrarySettings) -> Track {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut track = Track::new(abs);

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if !stem.trim().is_empty() {
        track.title = if settings.clean_titles {
            clean_title(stem)
        } else {
            stem.to_string()
        };
    }

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let duration = tagged.properties().duration();
            if !duration.is_zero() {
                track.duration = Some(duration);
            }

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = non_blank(tag.title()) {
                    track.title = v;
                }
                if let Some(v) = non_blank(tag.artist()) {
                    track.artist = v;
                }
                if let Some(v) = non_blank(tag.album()) {
                    track.album = v;
                }
                if let Some(pic) = tag.pictures().first() {
                    if !pic.data().is_empty() {
                        track.album_art = Some(pic.data().to_vec());
                    }
                }
            }
        }
        Err(e) => debug!("no readable tags in {}: {e}", path.display()),
    }

    track
}

fn scan_dir(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            tracks.push(track_from_file(path, settings));
        }
    }

    tracks
}

/// Collect tracks from a mix of dropped files and directories.
///
/// Files outside the extension allow-list are ignored; directories are walked
/// according to `settings`. Input order is preserved, and each directory
/// contributes its files sorted by name.
pub fn import_paths<I, P>(paths: I, settings: &LibrarySettings) -> Vec<Track>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut tracks = Vec::new();
    for p in paths {
        let path = p.as_ref();
        if path.is_dir() {
            tracks.extend(scan_dir(path, settings));
        } else if path.is_file() {
            if is_audio_file(path, settings) {
                tracks.push(track_from_file(path, settings));
            } else {
                debug!("skipping non-audio file {}", path.display());
            }
        } else {
            warn!("cannot import {}: no such file or directory", path.display());
        }
    }
    tracks
}

/// The allow-list rendered for messages, e.g. `.mp3, .wav`.
pub fn supported_extensions_text(settings: &LibrarySettings) -> String {
    settings
        .extensions
        .iter()
        .map(|e| format!(".{}", e.trim().trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join(", ")
}
