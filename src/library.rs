//! Track model and the import pipeline.
//!
//! `Track` is the value the rest of the crate passes around. Tracks are
//! produced by `import_paths` (dropped files and directories) or by decoding
//! a stored playlist.

mod display;
mod model;
mod scan;

pub use display::display_from_fields;
pub use model::{Rating, Track, UNKNOWN};
pub use scan::{clean_title, import_paths, supported_extensions_text, track_from_file};

#[cfg(test)]
mod tests;
