//! Command-line front end: argument parsing and dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::debug;

use crate::config;
use crate::error::Error;
use crate::storage::PlaylistStore;

mod commands;
mod event_loop;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "setlist")]
#[command(about = "Keep named playlists of local audio files and play them")]
#[command(version)]
pub struct Cli {
    /// Playlist data directory (overrides `storage.dir` from the config)
    #[arg(long, global = true, env = "SETLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List stored playlists
    List,
    /// Show the tracks of a playlist
    Show { name: String },
    /// Create an empty playlist
    Create { name: String },
    /// Import files or directories into a playlist
    Add {
        name: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove the track at a 1-based position
    Remove { name: String, position: usize },
    /// Rename a playlist
    Rename { old: String, new: String },
    /// Shuffle a playlist, keeping its current track first
    Shuffle { name: String },
    /// Delete a playlist
    Delete { name: String },
    /// Play a playlist in the terminal
    Play {
        name: String,
        /// Shuffle before playing
        #[arg(long)]
        shuffle: bool,
        /// 1-based position to start from
        #[arg(long)]
        start: Option<usize>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = settings::load_settings();

    let dir = cli
        .data_dir
        .clone()
        .or_else(|| settings.data_dir())
        .ok_or_else(|| Error::Config("no data directory; set storage.dir or $HOME".into()))?;
    let store = PlaylistStore::open(&dir);
    debug!("storage root: {}", store.path().display());

    dispatch(cli.command, &store, &settings)
}

fn dispatch(
    command: Command,
    store: &PlaylistStore,
    settings: &config::Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::List => commands::list(store),
        Command::Show { name } => commands::show(store, settings, &name)?,
        Command::Create { name } => commands::create(store, &name)?,
        Command::Add { name, paths } => {
            commands::add(store, settings, &name, &paths)?;
        }
        Command::Remove { name, position } => commands::remove(store, &name, position)?,
        Command::Rename { old, new } => commands::rename(store, &old, &new)?,
        Command::Shuffle { name } => commands::shuffle(store, &name)?,
        Command::Delete { name } => commands::delete(store, &name)?,
        Command::Play {
            name,
            shuffle,
            start,
        } => event_loop::play(store, settings, &name, shuffle, start)?,
    }
    Ok(())
}
