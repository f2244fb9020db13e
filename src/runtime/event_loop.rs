use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, queue};
use log::{debug, info, warn};

use crate::config;
use crate::playback::{Advance, Autoplay, LoopMode, PlaybackEngine, PlaybackState, RodioEngine};
use crate::playlist::{Playlist, PlaylistEvent};
use crate::storage::PlaylistStore;

use super::commands;

const VOLUME_STEP: f32 = 0.05;

const SEEK_STEP: Duration = Duration::from_secs(5);

const HELP: &str =
    "space pause | n/p next/prev | left/right seek | s shuffle | r loop mode | +/- volume | m mute | q quit";

/// State tracked by the key loop across iterations.
#[derive(Debug, Default)]
pub(super) struct EventLoopState {
    /// Volume to restore when unmuting; `Some` while muted.
    pub(super) muted_volume: Option<f32>,
}

/// Play `name` until the user quits or the playlist runs out.
///
/// A reorder made with `s` during the session is written back to the store on
/// exit; `--shuffle` and the configured default only affect this session.
pub fn play(
    store: &PlaylistStore,
    settings: &config::Settings,
    name: &str,
    shuffle: bool,
    start: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut playlist = commands::fetch(store, name)?;
    if playlist.is_empty() {
        println!("\"{}\" is empty", playlist.name());
        return Ok(());
    }

    if shuffle || settings.playback.shuffle {
        playlist.shuffle();
    }
    let first = match start {
        Some(position) => commands::position_index(&playlist, position)?,
        None => playlist.cursor().unwrap_or(0),
    };
    let events = playlist.subscribe();

    let engine = RodioEngine::open(settings.playback.volume)?;
    let mut auto = Autoplay::new(engine, LoopMode::from(settings.playback.loop_mode));

    enable_raw_mode()?;
    let mut stdout = io::stdout();

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        execute!(stdout, Print(HELP), Print("\r\n"))?;
        if !auto.jump(&mut playlist, first) {
            warn!("nothing in \"{}\" could be played", playlist.name());
            return Ok(());
        }
        let mut state = EventLoopState::default();
        run(&mut stdout, settings, &mut auto, &mut playlist, &mut state)
    })();

    auto.stop(&mut playlist);
    let restore = disable_raw_mode().and_then(|()| execute!(stdout, Print("\n")));

    finish_session(store, &playlist, &events, run_result, restore)
}

/// Save an in-session reorder, then report the session's error, then the
/// terminal-restore error. The save happens whatever the other two were.
fn finish_session(
    store: &PlaylistStore,
    playlist: &Playlist,
    events: &Receiver<PlaylistEvent>,
    run_result: Result<(), Box<dyn std::error::Error>>,
    restore: io::Result<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    let reordered = events
        .try_iter()
        .any(|e| matches!(e, PlaylistEvent::Shuffled));
    let saved = if reordered {
        store.save(playlist)
    } else {
        Ok(())
    };

    run_result?;
    restore?;
    saved?;
    Ok(())
}

/// Poll keys and the engine until quit or the end of the playlist.
fn run<E: PlaybackEngine>(
    out: &mut impl Write,
    settings: &config::Settings,
    auto: &mut Autoplay<E>,
    playlist: &mut Playlist,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll_interval = Duration::from_millis(settings.playback.poll_interval_ms);

    loop {
        if auto.tick(playlist) == Advance::Stopped {
            info!("end of \"{}\"", playlist.name());
            return Ok(());
        }

        draw_status(out, settings, auto, playlist, state)?;

        if event::poll(poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, auto, playlist, state) {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns `true` when the user asked to quit.
pub(super) fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    auto: &mut Autoplay<E>,
    playlist: &mut Playlist,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char(' ') => auto.engine_mut().toggle_pause(),
        KeyCode::Char('n') => {
            auto.next(playlist);
        }
        KeyCode::Char('p') => {
            auto.previous(playlist);
        }
        KeyCode::Right => seek_by(auto, playlist, SEEK_STEP, true),
        KeyCode::Left => seek_by(auto, playlist, SEEK_STEP, false),
        KeyCode::Char('s') => playlist.shuffle(),
        KeyCode::Char('r') => {
            let mode = auto.cycle_loop_mode();
            debug!("loop mode: {}", mode.label());
        }
        KeyCode::Char('+') | KeyCode::Char('=') => adjust_volume(auto, state, VOLUME_STEP),
        KeyCode::Char('-') => adjust_volume(auto, state, -VOLUME_STEP),
        KeyCode::Char('m') => toggle_mute(auto, state),
        _ => {}
    }
    false
}

/// Seek relative to the current position, clamped to the track bounds.
fn seek_by<E: PlaybackEngine>(
    auto: &mut Autoplay<E>,
    playlist: &Playlist,
    step: Duration,
    forward: bool,
) {
    let engine = auto.engine_mut();
    if engine.state() == PlaybackState::Stopped {
        return;
    }
    let pos = engine.position();
    let mut target = if forward {
        pos + step
    } else {
        pos.saturating_sub(step)
    };
    if let Some(total) = playlist.current_track().and_then(|t| t.duration) {
        target = target.min(total);
    }
    if let Err(e) = engine.seek(target) {
        warn!("{e}");
    }
}

fn adjust_volume<E: PlaybackEngine>(
    auto: &mut Autoplay<E>,
    state: &mut EventLoopState,
    delta: f32,
) {
    let engine = auto.engine_mut();
    // Changing the volume while muted starts from the level before muting.
    let base = state.muted_volume.take().unwrap_or(engine.volume());
    engine.set_volume(base + delta);
}

fn toggle_mute<E: PlaybackEngine>(auto: &mut Autoplay<E>, state: &mut EventLoopState) {
    let engine = auto.engine_mut();
    match state.muted_volume.take() {
        Some(v) => engine.set_volume(v),
        None => {
            state.muted_volume = Some(engine.volume());
            engine.set_volume(0.0);
        }
    }
}

fn draw_status<E: PlaybackEngine>(
    out: &mut impl Write,
    settings: &config::Settings,
    auto: &Autoplay<E>,
    playlist: &Playlist,
    state: &EventLoopState,
) -> io::Result<()> {
    let engine = auto.engine();
    let icon = match engine.state() {
        PlaybackState::Playing => ">",
        PlaybackState::Paused => "||",
        PlaybackState::Stopped => "[]",
    };
    let (label, total) = playlist
        .current_track()
        .map(|t| {
            (
                t.display_with(&settings.display.track_fields, &settings.display.separator),
                t.format_duration(),
            )
        })
        .unwrap_or_default();
    let position = playlist.cursor().map_or(0, |c| c + 1);
    let volume = if state.muted_volume.is_some() {
        "muted".to_string()
    } else {
        format!("vol {:.0}%", engine.volume() * 100.0)
    };

    let line = format!(
        "{icon} [{position}/{}] {label}  {} / {total}  ({})  {volume}",
        playlist.len(),
        format_elapsed(engine.position()),
        auto.loop_mode().label(),
    );

    queue!(
        out,
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(line)
    )?;
    out.flush()
}

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
