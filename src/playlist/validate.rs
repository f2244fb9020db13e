use thiserror::Error;

/// Longest accepted playlist name, in characters.
pub const MAX_PLAYLIST_NAME_LEN: usize = 100;

/// Characters rejected in playlist names (they are unsafe in file names).
pub const INVALID_NAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("the name cannot be empty")]
    Empty,
    #[error("the name is {len} characters long, the limit is {max}")]
    TooLong { len: usize, max: usize },
    #[error("the name contains the character '{0}', which is not allowed (not allowed: / \\ : * ? \" < > |)")]
    InvalidChar(char),
}

/// Check a playlist name. Surrounding whitespace is ignored.
pub fn validate_playlist_name(name: &str) -> Result<(), NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }

    let len = trimmed.chars().count();
    if len > MAX_PLAYLIST_NAME_LEN {
        return Err(NameError::TooLong {
            len,
            max: MAX_PLAYLIST_NAME_LEN,
        });
    }

    if let Some(c) = trimmed.chars().find(|c| INVALID_NAME_CHARS.contains(c)) {
        return Err(NameError::InvalidChar(c));
    }

    Ok(())
}

pub fn is_valid_playlist_name(name: &str) -> bool {
    validate_playlist_name(name).is_ok()
}

/// Replace every forbidden character with `_`. Blank input becomes `untitled`.
pub fn sanitize_file_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "untitled".to_string();
    }
    trimmed
        .chars()
        .map(|c| if INVALID_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}
