//! Text format for the storage root.
//!
//! The root is a JSON array of `{"name": ..., "songs": [...]}` objects, each
//! song carrying `title`, `artist`, `album` and `filePath`. Nothing else
//! about a track is stored: duration, rating and cover art are lost on a
//! save/load cycle.
//!
//! Decoding never fails. A document `serde_json` accepts is read as-is;
//! anything else goes through [`salvage`], which keeps every playlist object
//! it can still make sense of.

use std::path::PathBuf;

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::library::{Track, UNKNOWN};
use crate::playlist::Playlist;

#[derive(Serialize)]
struct StoredSong<'a> {
    title: &'a str,
    artist: &'a str,
    album: &'a str,
    #[serde(rename = "filePath")]
    file_path: String,
}

#[derive(Serialize)]
struct StoredPlaylist<'a> {
    name: &'a str,
    songs: Vec<StoredSong<'a>>,
}

/// Render playlists as a pretty-printed array (two-space indent).
pub fn encode(playlists: &[Playlist]) -> serde_json::Result<String> {
    let stored: Vec<StoredPlaylist<'_>> = playlists
        .iter()
        .map(|p| StoredPlaylist {
            name: p.name(),
            songs: p
                .tracks()
                .iter()
                .map(|t| StoredSong {
                    title: &t.title,
                    artist: &t.artist,
                    album: &t.album,
                    file_path: t.path.to_string_lossy().into_owned(),
                })
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&stored)
}

/// Parse a storage root. Broken input yields fewer (or zero) playlists.
pub fn decode(text: &str) -> Vec<Playlist> {
    let text = text.trim();
    if !text.starts_with('[') || !text.ends_with(']') {
        if !text.is_empty() {
            warn!("playlist document is not an array; ignoring it");
        }
        return Vec::new();
    }

    match serde_json::from_str::<Vec<Value>>(text) {
        Ok(items) => items.iter().filter_map(playlist_from_value).collect(),
        Err(e) => {
            debug!("strict parse failed ({e}); salvaging playlist objects");
            salvage::split_objects(&text[1..text.len() - 1])
                .into_iter()
                .filter_map(playlist_from_object_text)
                .collect()
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn track_from_fields(
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    file_path: Option<String>,
) -> Track {
    Track::with_metadata(
        PathBuf::from(file_path.unwrap_or_default()),
        title.unwrap_or_else(|| UNKNOWN.to_string()),
        artist.unwrap_or_else(|| UNKNOWN.to_string()),
        album.unwrap_or_else(|| UNKNOWN.to_string()),
    )
}

fn playlist_from_value(value: &Value) -> Option<Playlist> {
    let Some(obj) = value.as_object() else {
        warn!("skipping playlist entry that is not an object");
        return None;
    };
    let Some(name) = string_field(obj, "name") else {
        warn!("skipping playlist entry without a name");
        return None;
    };

    let tracks = obj
        .get("songs")
        .and_then(Value::as_array)
        .map(|songs| {
            songs
                .iter()
                .filter_map(Value::as_object)
                .map(|s| {
                    track_from_fields(
                        string_field(s, "title"),
                        string_field(s, "artist"),
                        string_field(s, "album"),
                        string_field(s, "filePath"),
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    Some(Playlist::with_tracks(name, tracks))
}

fn playlist_from_object_text(obj: &str) -> Option<Playlist> {
    if let Ok(value) = serde_json::from_str::<Value>(obj) {
        return playlist_from_value(&value);
    }

    let Some(name) = salvage::string_field(obj, "name") else {
        warn!("skipping unreadable playlist entry");
        return None;
    };
    let tracks = salvage::array_field(obj, "songs")
        .map(|songs| {
            salvage::split_objects(songs)
                .into_iter()
                .map(|s| {
                    track_from_fields(
                        salvage::string_field(s, "title"),
                        salvage::string_field(s, "artist"),
                        salvage::string_field(s, "album"),
                        salvage::string_field(s, "filePath"),
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    Some(Playlist::with_tracks(name, tracks))
}

/// Tolerant scanning for documents `serde_json` rejects (trailing commas,
/// a damaged neighbor object, hand edits).
///
/// Object and array boundaries are found by depth counting; braces inside
/// string literals do not count.
pub(crate) mod salvage {
    /// Byte index just past the closing quote of the string starting at `start`.
    fn string_end(s: &str, start: usize) -> Option<usize> {
        let bytes = s.as_bytes();
        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'"' => return Some(i + 1),
                _ => i += 1,
            }
        }
        None
    }

    /// Byte index just past the bracket closing the one at `start`.
    fn matching_end(s: &str, start: usize, open: u8, close: u8) -> Option<usize> {
        let bytes = s.as_bytes();
        let mut depth = 0usize;
        let mut i = start;
        while i < bytes.len() {
            let b = bytes[i];
            if b == b'"' {
                i = string_end(s, i)?;
                continue;
            }
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            i += 1;
        }
        None
    }

    /// Every complete top-level `{...}` in `s`. An unterminated trailing
    /// object is dropped.
    pub(crate) fn split_objects(s: &str) -> Vec<&str> {
        let bytes = s.as_bytes();
        let mut out = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'{' => match matching_end(s, i, b'{', b'}') {
                    Some(end) => {
                        out.push(&s[i..end]);
                        i = end;
                    }
                    None => break,
                },
                b'"' => match string_end(s, i) {
                    Some(end) => i = end,
                    None => break,
                },
                _ => i += 1,
            }
        }
        out
    }

    /// Position right after `"key"` followed by optional whitespace and a colon,
    /// looking only at the top level of `obj`.
    fn value_start(obj: &str, key: &str) -> Option<usize> {
        let bytes = obj.as_bytes();
        let mut depth = 0usize;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'{' | b'[' => {
                    depth += 1;
                    i += 1;
                }
                b'}' | b']' => {
                    depth = depth.saturating_sub(1);
                    i += 1;
                }
                b'"' => {
                    let end = string_end(obj, i)?;
                    if depth == 1 && unescape(&obj[i + 1..end - 1]) == key {
                        let rest = &obj[end..];
                        let trimmed = rest.trim_start();
                        if let Some(after_colon) = trimmed.strip_prefix(':') {
                            let skipped = rest.len() - after_colon.len();
                            let value = after_colon.trim_start();
                            return Some(end + skipped + (after_colon.len() - value.len()));
                        }
                    }
                    i = end;
                }
                _ => i += 1,
            }
        }
        None
    }

    /// The unescaped string value of `key`, if it holds a string literal.
    pub(crate) fn string_field(obj: &str, key: &str) -> Option<String> {
        let start = value_start(obj, key)?;
        if obj.as_bytes().get(start) != Some(&b'"') {
            return None;
        }
        let end = string_end(obj, start)?;
        Some(unescape(&obj[start + 1..end - 1]))
    }

    /// The inside of the array value of `key` (without the brackets).
    /// A truncated array yields whatever follows the opening bracket.
    pub(crate) fn array_field<'a>(obj: &'a str, key: &str) -> Option<&'a str> {
        let start = value_start(obj, key)?;
        if obj.as_bytes().get(start) != Some(&b'[') {
            return None;
        }
        match matching_end(obj, start, b'[', b']') {
            Some(end) => Some(&obj[start + 1..end - 1]),
            None => Some(&obj[start + 1..]),
        }
    }

    /// Inverse of the writer's escaping for `\\ \" \n \r \t`. Other escapes
    /// (`\/`, `\uXXXX`) are decoded too; unknown ones are kept verbatim.
    pub(crate) fn unescape(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('/') => out.push('/'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(decoded) => out.push(decoded),
                        None => {
                            out.push_str("\\u");
                            out.push_str(&hex);
                        }
                    }
                }
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        }
        out
    }
}
