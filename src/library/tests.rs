use super::*;
use crate::config::TrackDisplayField;
use std::time::Duration;

fn song() -> Track {
    Track::with_metadata("/music/Song.mp3", "Song", "Artist", UNKNOWN)
}

#[test]
fn display_from_fields_can_format_artist_title() {
    let t = song();
    assert_eq!(
        display_from_fields(&t, &[TrackDisplayField::Artist, TrackDisplayField::Title], " - "),
        "Artist - Song"
    );

    let padded = Track::with_metadata("/music/Song.mp3", "Song", "  Artist  ", UNKNOWN);
    assert_eq!(
        padded.display_with(&[TrackDisplayField::Artist, TrackDisplayField::Title], " - "),
        "Artist - Song"
    );
}

#[test]
fn display_skips_unknown_placeholders() {
    let t = Track::new("/music/01 Intro.flac");
    assert_eq!(
        display_from_fields(&t, &[TrackDisplayField::Artist, TrackDisplayField::Album], " - "),
        "01 Intro.flac"
    );
    assert_eq!(
        display_from_fields(&t, &[TrackDisplayField::Filename], " - "),
        "01 Intro"
    );
    assert_eq!(
        display_from_fields(&song(), &[TrackDisplayField::Album], " | "),
        "Song"
    );
}

#[test]
fn tracks_compare_by_path_only() {
    let a = Track::with_metadata("/music/a.mp3", "A", "X", "Y");
    let b = Track::with_metadata("/music/a.mp3", "Other", "Other", "Other");
    let c = Track::with_metadata("/music/c.mp3", "A", "X", "Y");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn new_track_uses_unknown_placeholders() {
    let t = Track::new("/music/a.mp3");
    assert_eq!(t.title, UNKNOWN);
    assert_eq!(t.artist, UNKNOWN);
    assert_eq!(t.album, UNKNOWN);
    assert!(t.duration.is_none());
    assert!(!t.playing);
    assert_eq!(t.to_string(), "Unknown - Unknown");
}

#[test]
fn rating_is_clamped_on_every_write() {
    let mut t = song();
    t.set_rating(9);
    assert_eq!(t.rating.value(), 5);
    t.set_rating(-3);
    assert_eq!(t.rating.value(), 0);
    assert!(!t.rating.has_rating());

    let mut r = Rating::new(3);
    assert_eq!(r.filled_stars(), 3);
    assert_eq!(r.empty_stars(), 2);
    assert_eq!(r.to_string(), "★★★☆☆");
    r.clear();
    assert_eq!(r, Rating::default());
}

#[test]
fn format_duration_renders_minutes_and_padded_seconds() {
    let mut t = song();
    assert_eq!(t.format_duration(), "0:00");
    t.duration = Some(Duration::from_secs(185));
    assert_eq!(t.format_duration(), "3:05");
    t.duration = Some(Duration::from_millis(59_900));
    assert_eq!(t.format_duration(), "0:59");
}
