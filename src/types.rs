use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{bingo::BingoCard, error::BingoError};

/// A song from the library.
///
/// Songs are never modified by the engine; cards and sessions only keep
/// references to [`Song::id`] or cloned snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub cue_in: f64,
    #[serde(default)]
    pub cue_out: f64,
    #[serde(default)]
    pub has_audio: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Song {
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            duration_seconds: 0.0,
            cue_in: 0.0,
            cue_out: 0.0,
            has_audio: false,
            youtube_id: None,
            audio_url: None,
        }
    }

    /// Length of the fragment between cue-in and cue-out, if one is configured.
    pub fn clip_duration(&self) -> Option<Duration> {
        if self.cue_out > self.cue_in && self.cue_in >= 0.0 {
            Some(Duration::from_secs_f64(self.cue_out - self.cue_in))
        } else {
            None
        }
    }

    /// Checks the fragment window: `0 <= cueIn < cueOut <= durationSeconds`.
    ///
    /// A song without any cue points (both zero) is accepted, it simply has
    /// no configured clip.
    pub fn validate(&self) -> Result<(), BingoError> {
        let invalid = |reason: &str| BingoError::InvalidSong {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if self.cue_in == 0.0 && self.cue_out == 0.0 {
            return Ok(());
        }
        if self.cue_in < 0.0 {
            return Err(invalid("cue in must not be negative"));
        }
        if self.cue_in >= self.cue_out {
            return Err(invalid("cue in must come before cue out"));
        }
        if self.duration_seconds > 0.0 && self.cue_out > self.duration_seconds {
            return Err(invalid("cue out exceeds the song duration"));
        }
        Ok(())
    }
}

/// Shape of a bingo card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layout {
    /// 3 rows of 5 songs, no free space.
    #[default]
    #[serde(rename = "3x5")]
    ThreeByFive,
    /// 5 rows of 5 cells with a free space in the center.
    #[serde(rename = "5x5")]
    FiveByFive,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::ThreeByFive, Layout::FiveByFive];

    pub fn rows(&self) -> usize {
        match self {
            Layout::ThreeByFive => 3,
            Layout::FiveByFive => 5,
        }
    }

    pub fn cols(&self) -> usize {
        5
    }

    /// Position of the free space, if the layout has one.
    pub fn free_space(&self) -> Option<(usize, usize)> {
        match self {
            Layout::ThreeByFive => None,
            Layout::FiveByFive => Some((2, 2)),
        }
    }

    /// Number of song cells on a card, which is also the minimum pool size.
    pub fn song_cells(&self) -> usize {
        let cells = self.rows() * self.cols();
        if self.free_space().is_some() {
            cells - 1
        } else {
            cells
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::ThreeByFive => "3x5",
            Layout::FiveByFive => "5x5",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cell of a card grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Song(String),
    FreeSpace,
}

impl Cell {
    pub fn song_id(&self) -> Option<&str> {
        match self {
            Cell::Song(id) => Some(id.as_str()),
            Cell::FreeSpace => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Cell::FreeSpace)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Stopped,
    Errored,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Loading => "loading",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Errored => "errored",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinMode {
    #[default]
    FullCard,
    Line,
}

impl fmt::Display for WinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinMode::FullCard => f.write_str("full_card"),
            WinMode::Line => f.write_str("line"),
        }
    }
}

/// An entry of the call history kept by a saved game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalledSong {
    pub song_id: String,
    pub title: String,
    pub artist: String,
    pub order: usize,
    pub called_at: DateTime<Utc>,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub clip: String,
    pub audio: String,
}

impl From<&Song> for SongTableRow {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            clip: match song.clip_duration() {
                Some(clip) => format!("{:.0}s @ {:.0}s", clip.as_secs_f64(), song.cue_in),
                None => "-".to_string(),
            },
            audio: if song.has_audio { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct CardTableRow {
    pub id: String,
    pub seed: String,
    pub layout: String,
    pub marked: String,
    pub created: String,
}

impl From<&BingoCard> for CardTableRow {
    fn from(card: &BingoCard) -> Self {
        Self {
            id: card.id().to_string(),
            seed: card.seed().to_string(),
            layout: card.layout().to_string(),
            marked: format!("{}/{}", card.marked().len(), card.layout().song_cells()),
            created: card.created_at().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
