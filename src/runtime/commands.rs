//! One function per non-interactive subcommand. Each reads the store, applies
//! its change to a [`Playlist`] and writes it back.

use std::path::PathBuf;

use log::{info, warn};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::library::{Track, import_paths, supported_extensions_text};
use crate::playlist::Playlist;
use crate::storage::PlaylistStore;

pub(super) fn fetch(store: &PlaylistStore, name: &str) -> Result<Playlist> {
    store
        .get(name)
        .ok_or_else(|| Error::NotFound(name.to_string()))
}

/// Convert a 1-based position into an index of `playlist`.
pub(super) fn position_index(playlist: &Playlist, position: usize) -> Result<usize> {
    if position == 0 || position > playlist.len() {
        return Err(Error::InvalidPosition {
            position,
            len: playlist.len(),
        });
    }
    Ok(position - 1)
}

pub(super) fn list(store: &PlaylistStore) {
    let all = store.load();
    if all.is_empty() {
        println!("no playlists yet");
        return;
    }
    for p in &all {
        let n = p.len();
        println!("{} ({n} track{})", p.name(), if n == 1 { "" } else { "s" });
    }
}

pub(super) fn show(store: &PlaylistStore, settings: &Settings, name: &str) -> Result<()> {
    let playlist = fetch(store, name)?;
    println!("{}", playlist.name());
    for (i, t) in playlist.tracks().iter().enumerate() {
        let label = t.display_with(&settings.display.track_fields, &settings.display.separator);
        println!("{:>3}. {label} [{}]", i + 1, t.format_duration());
    }
    Ok(())
}

pub(super) fn create(store: &PlaylistStore, name: &str) -> Result<()> {
    let p = store.create(name)?;
    println!("created \"{}\"", p.name());
    Ok(())
}

/// Import `paths` and append the tracks not already in the playlist.
pub(super) fn add(
    store: &PlaylistStore,
    settings: &Settings,
    name: &str,
    paths: &[PathBuf],
) -> Result<usize> {
    let mut playlist = fetch(store, name)?;

    let imported = import_paths(paths, &settings.library);
    if imported.is_empty() {
        warn!(
            "nothing to import; supported formats: {}",
            supported_extensions_text(&settings.library)
        );
        return Ok(0);
    }

    let mut fresh: Vec<Track> = Vec::with_capacity(imported.len());
    for track in imported {
        if playlist.contains(&track.path) || fresh.contains(&track) {
            info!("already in \"{name}\": {}", track.path.display());
            continue;
        }
        fresh.push(track);
    }
    let added = fresh.len();
    playlist.add_tracks(fresh);

    if added > 0 {
        store.save(&playlist)?;
    }
    println!("added {added} track(s) to \"{}\"", playlist.name());
    Ok(added)
}

pub(super) fn remove(store: &PlaylistStore, name: &str, position: usize) -> Result<()> {
    let mut playlist = fetch(store, name)?;
    let index = position_index(&playlist, position)?;
    if let Some(t) = playlist.remove_at(index) {
        store.save(&playlist)?;
        println!("removed {t}");
    }
    Ok(())
}

pub(super) fn rename(store: &PlaylistStore, old: &str, new: &str) -> Result<()> {
    let p = store.rename(old, new)?;
    println!("renamed \"{old}\" to \"{}\"", p.name());
    Ok(())
}

pub(super) fn shuffle(store: &PlaylistStore, name: &str) -> Result<()> {
    let mut playlist = fetch(store, name)?;
    playlist.shuffle();
    store.save(&playlist)?;
    println!("shuffled \"{}\"", playlist.name());
    Ok(())
}

pub(super) fn delete(store: &PlaylistStore, name: &str) -> Result<()> {
    if !store.delete(name)? {
        return Err(Error::NotFound(name.to_string()));
    }
    println!("deleted \"{name}\"");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup() -> (tempfile::TempDir, PlaylistStore, Settings) {
        let dir = tempfile::tempdir().unwrap();
        let store = PlaylistStore::open(dir.path().join("data"));
        (dir, store, Settings::default())
    }

    fn touch(dir: &std::path::Path, name: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, b"").unwrap();
        p
    }

    #[test]
    fn position_is_one_based() {
        let (dir, store, settings) = setup();
        store.create("Mix").unwrap();
        let song = touch(dir.path(), "a.mp3");
        add(&store, &settings, "Mix", &[song]).unwrap();

        let p = fetch(&store, "Mix").unwrap();
        assert_eq!(position_index(&p, 1).unwrap(), 0);
        assert!(matches!(
            position_index(&p, 0),
            Err(Error::InvalidPosition { position: 0, len: 1 })
        ));
        assert!(position_index(&p, 2).is_err());
    }

    #[test]
    fn add_imports_directory_and_skips_duplicates() {
        let (dir, store, settings) = setup();
        let music = dir.path().join("music");
        fs::create_dir(&music).unwrap();
        touch(&music, "02_second.mp3");
        touch(&music, "01_first.flac");
        touch(&music, "cover.jpg");
        store.create("Road Trip").unwrap();

        assert_eq!(add(&store, &settings, "Road Trip", &[music.clone()]).unwrap(), 2);
        assert_eq!(add(&store, &settings, "Road Trip", &[music]).unwrap(), 0);

        let p = fetch(&store, "Road Trip").unwrap();
        let titles: Vec<_> = p.tracks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn add_keeps_one_copy_of_a_path_given_twice() {
        let (dir, store, settings) = setup();
        store.create("Mix").unwrap();
        let song = touch(dir.path(), "a.mp3");

        assert_eq!(add(&store, &settings, "Mix", &[song.clone(), song]).unwrap(), 1);
        assert_eq!(fetch(&store, "Mix").unwrap().len(), 1);
    }

    #[test]
    fn add_to_missing_playlist_is_not_found() {
        let (dir, store, settings) = setup();
        let song = touch(dir.path(), "a.mp3");
        let err = add(&store, &settings, "Nope", &[song]).unwrap_err();
        assert!(matches!(err, Error::NotFound(n) if n == "Nope"));
    }

    #[test]
    fn remove_persists_and_rejects_bad_positions() {
        let (dir, store, settings) = setup();
        store.create("Mix").unwrap();
        let songs = vec![touch(dir.path(), "a.mp3"), touch(dir.path(), "b.mp3")];
        add(&store, &settings, "Mix", &songs).unwrap();

        remove(&store, "Mix", 1).unwrap();
        let p = fetch(&store, "Mix").unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.tracks()[0].title, "b");

        assert!(remove(&store, "Mix", 5).is_err());
        assert_eq!(fetch(&store, "Mix").unwrap().len(), 1);
    }

    #[test]
    fn shuffle_keeps_every_track() {
        let (dir, store, settings) = setup();
        store.create("Mix").unwrap();
        let songs: Vec<_> = (0..6)
            .map(|i| touch(dir.path(), &format!("{i}.mp3")))
            .collect();
        add(&store, &settings, "Mix", &songs).unwrap();

        shuffle(&store, "Mix").unwrap();
        let p = fetch(&store, "Mix").unwrap();
        let mut paths: Vec<_> = p.tracks().iter().map(|t| t.path.clone()).collect();
        paths.sort();
        let mut expected: Vec<_> = songs
            .iter()
            .map(|s| std::path::absolute(s).unwrap())
            .collect();
        expected.sort();
        assert_eq!(paths, expected);
    }

    #[test]
    fn delete_missing_playlist_is_not_found() {
        let (_dir, store, _settings) = setup();
        store.create("Mix").unwrap();
        delete(&store, "Mix").unwrap();
        assert!(matches!(delete(&store, "Mix"), Err(Error::NotFound(_))));
    }
}
