use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::BingoError,
    types::{Cell, Layout},
    utils,
};

/// A bingo card: a fixed grid of song references plus the seed it came from.
///
/// The grid is stored as data. Loading a saved card never re-derives it from
/// the seed, so saved cards survive changes to the shuffle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingoCard {
    id: String,
    seed: String,
    #[serde(default)]
    layout: Layout,
    grid: Vec<Vec<Cell>>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    marked: BTreeSet<String>,
    created_at: DateTime<Utc>,
}

impl BingoCard {
    /// Builds a card with a fresh id, checking the grid against the layout.
    pub fn from_grid(seed: String, layout: Layout, grid: Vec<Vec<Cell>>) -> Result<Self, BingoError> {
        validate_grid(layout, &grid)?;
        Ok(Self {
            id: utils::generate_card_id(),
            seed,
            layout,
            grid,
            marked: BTreeSet::new(),
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn marked(&self) -> &BTreeSet<String> {
        &self.marked
    }

    /// Song at a position; `None` for the free space or out-of-range positions.
    pub fn song_at(&self, row: usize, col: usize) -> Option<&str> {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(Cell::song_id)
    }

    pub fn is_free_space(&self, row: usize, col: usize) -> bool {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(Cell::is_free)
    }

    /// Song ids in row-major order, free space skipped.
    pub fn song_ids(&self) -> Vec<&str> {
        self.grid
            .iter()
            .flatten()
            .filter_map(Cell::song_id)
            .collect()
    }

    pub fn contains(&self, song_id: &str) -> bool {
        self.grid.iter().flatten().any(|c| c.song_id() == Some(song_id))
    }

    /// Flags a called song. Songs that are not on the card are ignored.
    ///
    /// Returns `true` when the marked set grew.
    pub fn mark(&mut self, song_id: &str) -> bool {
        if !self.contains(song_id) {
            return false;
        }
        self.marked.insert(song_id.to_string())
    }

    pub fn is_marked(&self, song_id: &str) -> bool {
        self.marked.contains(song_id)
    }

    pub fn to_json(&self) -> Result<String, BingoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, BingoError> {
        let card: BingoCard = serde_json::from_str(json)?;
        card.validate()?;
        Ok(card)
    }

    /// Checks the grid shape, the free space and that no song repeats.
    pub fn validate(&self) -> Result<(), BingoError> {
        validate_grid(self.layout, &self.grid)
    }
}

fn validate_grid(layout: Layout, grid: &[Vec<Cell>]) -> Result<(), BingoError> {
    if grid.len() != layout.rows() {
        return Err(BingoError::InvalidGrid(format!(
            "{} layout needs {} rows, got {}",
            layout,
            layout.rows(),
            grid.len()
        )));
    }

    let mut seen = BTreeSet::new();
    for (r, row) in grid.iter().enumerate() {
        if row.len() != layout.cols() {
            return Err(BingoError::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                r,
                row.len(),
                layout.cols()
            )));
        }
        for (c, cell) in row.iter().enumerate() {
            let free_here = layout.free_space() == Some((r, c));
            match cell {
                Cell::FreeSpace if !free_here => {
                    return Err(BingoError::InvalidGrid(format!(
                        "free space at ({}, {}) is not allowed",
                        r, c
                    )));
                }
                Cell::Song(_) if free_here => {
                    return Err(BingoError::InvalidGrid(format!(
                        "({}, {}) must be the free space",
                        r, c
                    )));
                }
                Cell::Song(id) if !seen.insert(id.as_str()) => {
                    return Err(BingoError::DuplicateSongId(id.clone()));
                }
                _ => {}
            }
        }
    }
    Ok(())
}
