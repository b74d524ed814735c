use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{bingo::card::BingoCard, types::WinMode};

/// Outcome of a win check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinResult {
    pub is_winner: bool,
    pub mode: WinMode,
    pub evaluated_at: DateTime<Utc>,
    /// `false` when the mode cannot be evaluated yet; `is_winner` is then `false`.
    pub supported: bool,
    /// Song cells that still wait for their call.
    pub missing: usize,
}

impl WinResult {
    pub fn message(&self) -> &'static str {
        match (self.supported, self.is_winner) {
            (false, _) => "This win mode is not supported yet",
            (true, true) => "BINGO! Card complete",
            (true, false) => "Songs still missing",
        }
    }
}

/// Checks a card against the songs called so far. Does not touch the card.
///
/// Only [`WinMode::FullCard`] is evaluated. [`WinMode::Line`] always comes
/// back with `supported == false`.
pub fn check_win<S: AsRef<str>>(card: &BingoCard, drawn_song_ids: &[S], mode: WinMode) -> WinResult {
    let drawn: HashSet<&str> = drawn_song_ids.iter().map(|id| id.as_ref()).collect();
    let missing = card
        .song_ids()
        .into_iter()
        .filter(|id| !drawn.contains(id))
        .count();

    match mode {
        WinMode::FullCard => WinResult {
            is_winner: missing == 0,
            mode,
            evaluated_at: Utc::now(),
            supported: true,
            missing,
        },
        WinMode::Line => WinResult {
            is_winner: false,
            mode,
            evaluated_at: Utc::now(),
            supported: false,
            missing,
        },
    }
}

/// Marks every drawn song that is on the card and returns how many were new.
pub fn mark_drawn<S: AsRef<str>>(card: &mut BingoCard, drawn_song_ids: &[S]) -> usize {
    drawn_song_ids
        .iter()
        .filter(|id| card.mark(id.as_ref()))
        .count()
}
