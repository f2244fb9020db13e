//! Change notifications emitted by a [`Playlist`](super::Playlist).
//!
//! Subscribers get an `mpsc::Receiver`; the playlist keeps the senders and
//! drops the ones whose receiver went away.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistEvent {
    TrackAdded { index: usize },
    TrackRemoved { index: usize },
    Cleared,
    Shuffled,
    CursorMoved { from: Option<usize>, to: Option<usize> },
    Renamed { from: String, to: String },
}

#[derive(Default)]
pub(super) struct Subscribers {
    senders: Vec<Sender<PlaylistEvent>>,
}

impl Subscribers {
    pub(super) fn subscribe(&mut self) -> Receiver<PlaylistEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    pub(super) fn emit(&mut self, event: PlaylistEvent) {
        if self.senders.is_empty() {
            return;
        }
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub(super) fn len(&self) -> usize {
        self.senders.len()
    }
}

// A cloned playlist starts with no listeners.
impl Clone for Subscribers {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.senders.len())
            .finish()
    }
}
