use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    bingo::{BingoCard, WinResult, check_win},
    config,
    error::BingoError,
    types::{CalledSong, Song, WinMode},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameData {
    #[serde(default)]
    cards: Vec<BingoCard>,
    #[serde(default)]
    history: Vec<CalledSong>,
    #[serde(default)]
    active: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameExport {
    #[serde(flatten)]
    game: GameData,
    exported_at: DateTime<Utc>,
}

/// The saved game: issued cards, the songs called so far and whether the
/// game is still running.
pub struct GameManager {
    path: PathBuf,
    data: GameData,
}

impl GameManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: GameData::default(),
        }
    }

    pub async fn load() -> Result<Self, BingoError> {
        Self::load_from(config::game_path()).await
    }

    /// Loads a saved game. A missing file is an empty, inactive game.
    pub async fn load_from(path: PathBuf) -> Result<Self, BingoError> {
        if !path.is_file() {
            return Ok(Self::new(path));
        }

        let json = async_fs::read_to_string(&path).await?;
        let data: GameData = serde_json::from_str(&json)?;
        for card in &data.cards {
            card.validate()?;
        }
        Ok(Self { path, data })
    }

    pub async fn persist(&self) -> Result<(), BingoError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.data)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Adds a card unless one with the same id is already part of the game.
    pub fn add_card(&mut self, card: BingoCard) -> bool {
        if self.card(card.id()).is_some() {
            return false;
        }
        self.data.cards.push(card);
        true
    }

    pub fn add_cards(&mut self, cards: Vec<BingoCard>) -> usize {
        let mut added = 0;
        for card in cards {
            if self.add_card(card) {
                added += 1;
            }
        }
        added
    }

    pub fn remove_card(&mut self, card_id: &str) -> Result<BingoCard, BingoError> {
        let index = self
            .data
            .cards
            .iter()
            .position(|c| c.id() == card_id)
            .ok_or_else(|| BingoError::CardNotFound(card_id.to_string()))?;
        Ok(self.data.cards.remove(index))
    }

    pub fn card(&self, card_id: &str) -> Option<&BingoCard> {
        self.data.cards.iter().find(|c| c.id() == card_id)
    }

    pub fn cards(&self) -> &[BingoCard] {
        &self.data.cards
    }

    /// Records a called song and marks it on every card that has it.
    ///
    /// A song already in the history is not appended again. Returns the
    /// number of cards that gained a mark.
    pub fn record_call(&mut self, song: &Song) -> usize {
        if !self.data.history.iter().any(|c| c.song_id == song.id) {
            let order = self.data.history.len() + 1;
            self.data.history.push(CalledSong {
                song_id: song.id.clone(),
                title: song.title.clone(),
                artist: song.artist.clone(),
                order,
                called_at: Utc::now(),
            });
        }

        self.data
            .cards
            .iter_mut()
            .map(|card| card.mark(&song.id))
            .filter(|newly_marked| *newly_marked)
            .count()
    }

    pub fn mark_song(&mut self, card_id: &str, song_id: &str) -> Result<bool, BingoError> {
        self.data
            .cards
            .iter_mut()
            .find(|c| c.id() == card_id)
            .map(|card| card.mark(song_id))
            .ok_or_else(|| BingoError::CardNotFound(card_id.to_string()))
    }

    pub fn called_ids(&self) -> Vec<&str> {
        self.data.history.iter().map(|c| c.song_id.as_str()).collect()
    }

    pub fn check_winner(&self, card_id: &str, mode: WinMode) -> Result<WinResult, BingoError> {
        let card = self
            .card(card_id)
            .ok_or_else(|| BingoError::CardNotFound(card_id.to_string()))?;
        Ok(check_win(card, &self.called_ids(), mode))
    }

    pub fn winners(&self, mode: WinMode) -> Vec<&BingoCard> {
        let called = self.called_ids();
        self.data
            .cards
            .iter()
            .filter(|card| check_win(card, &called, mode).is_winner)
            .collect()
    }

    /// Drops the cards and the call history and opens a new game.
    pub fn start_new_game(&mut self) {
        self.data.cards.clear();
        self.data.history.clear();
        self.data.active = true;
    }

    pub fn finish_game(&mut self) {
        self.data.active = false;
    }

    pub fn clear_all(&mut self) {
        self.data = GameData::default();
    }

    pub fn is_active(&self) -> bool {
        self.data.active
    }

    pub fn history(&self) -> &[CalledSong] {
        &self.data.history
    }

    pub fn last_call(&self) -> Option<&CalledSong> {
        self.data.history.last()
    }

    pub fn total_cards(&self) -> usize {
        self.data.cards.len()
    }

    pub fn total_calls(&self) -> usize {
        self.data.history.len()
    }

    /// The whole game as JSON, stamped with the export time.
    pub fn export_json(&self) -> Result<String, BingoError> {
        let export = GameExport {
            game: self.data.clone(),
            exported_at: Utc::now(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Replaces the game with an export. Nothing changes when the export is
    /// malformed or holds an invalid card.
    pub fn import_json(&mut self, json: &str) -> Result<(), BingoError> {
        let export: GameExport = serde_json::from_str(json)?;
        for card in &export.game.cards {
            card.validate()?;
        }
        self.data = export.game;
        Ok(())
    }
}
