use std::{fmt, io};

use crate::types::{Layout, PlaybackState};

/// Everything that can go wrong inside the bingo engine and its managers.
#[derive(Debug)]
pub enum BingoError {
    /// The pool is smaller than the number of song cells of the layout.
    InsufficientSongs {
        layout: Layout,
        required: usize,
        available: usize,
    },
    DuplicateSongId(String),
    InvalidSong { id: String, reason: String },
    /// `play_current_song` was called before any song was drawn.
    NoCurrentSong,
    /// A clip is already loading or playing.
    PlaybackBusy(PlaybackState),
    /// The audio port could not turn a song into something playable.
    AudioResolution { song_id: String, reason: String },
    UnknownSong(String),
    CardNotFound(String),
    /// A grid whose shape does not match its layout.
    InvalidGrid(String),
    IoError(io::Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for BingoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BingoError::InsufficientSongs {
                layout,
                required,
                available,
            } => write!(
                f,
                "a {} card needs at least {} songs, only {} available",
                layout, required, available
            ),
            BingoError::DuplicateSongId(id) => write!(f, "song id '{}' appears more than once", id),
            BingoError::InvalidSong { id, reason } => write!(f, "song '{}' is invalid: {}", id, reason),
            BingoError::NoCurrentSong => write!(f, "no song has been drawn yet"),
            BingoError::PlaybackBusy(state) => {
                write!(f, "playback is already in progress ({})", state)
            }
            BingoError::AudioResolution { song_id, reason } => {
                write!(f, "no audio for song '{}': {}", song_id, reason)
            }
            BingoError::UnknownSong(id) => write!(f, "unknown song '{}'", id),
            BingoError::CardNotFound(id) => write!(f, "card '{}' not found", id),
            BingoError::InvalidGrid(reason) => write!(f, "invalid card grid: {}", reason),
            BingoError::IoError(e) => write!(f, "io error: {}", e),
            BingoError::SerdeError(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for BingoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BingoError::IoError(e) => Some(e),
            BingoError::SerdeError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BingoError {
    fn from(err: io::Error) -> Self {
        BingoError::IoError(err)
    }
}

impl From<serde_json::Error> for BingoError {
    fn from(err: serde_json::Error) -> Self {
        BingoError::SerdeError(err)
    }
}
