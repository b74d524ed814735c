use std::collections::HashSet;

use crate::{
    bingo::{card::BingoCard, rng::SeededRng},
    error::BingoError,
    types::{Cell, Layout, Song},
    utils,
};

/// Options for [`generate_card`] and [`generate_cards`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardOptions {
    /// Seed of a single card. A random one is generated when missing.
    pub seed: Option<String>,
    /// Seed of a batch; card `i` uses `"{base_seed}_{i}"`.
    pub base_seed: Option<String>,
    /// Best-effort: avoid placing the same artist twice in one row.
    pub prevent_duplicate_artist: bool,
    pub layout: Layout,
}

impl CardOptions {
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: Some(seed.into()),
            ..Default::default()
        }
    }

    pub fn with_base_seed(base_seed: impl Into<String>) -> Self {
        Self {
            base_seed: Some(base_seed.into()),
            ..Default::default()
        }
    }
}

/// Seed of card `index` in a batch.
pub fn batch_seed(base_seed: Option<&str>, index: usize) -> String {
    match base_seed {
        Some(base) => format!("{}_{}", base, index),
        None => utils::generate_seed(),
    }
}

/// Builds one card from the pool.
///
/// The same song order, seed and options always produce the same grid.
pub fn generate_card(songs: &[Song], options: &CardOptions) -> Result<BingoCard, BingoError> {
    check_pool(songs, options.layout)?;

    let seed = options.seed.clone().unwrap_or_else(utils::generate_seed);
    let grid = build_grid(songs, &seed, options);
    BingoCard::from_grid(seed, options.layout, grid)
}

/// Builds `count` independent cards.
pub fn generate_cards(
    songs: &[Song],
    count: usize,
    options: &CardOptions,
) -> Result<Vec<BingoCard>, BingoError> {
    check_pool(songs, options.layout)?;

    (0..count)
        .map(|index| {
            let seed = batch_seed(options.base_seed.as_deref(), index);
            let grid = build_grid(songs, &seed, options);
            BingoCard::from_grid(seed, options.layout, grid)
        })
        .collect()
}

fn check_pool(songs: &[Song], layout: Layout) -> Result<(), BingoError> {
    let required = layout.song_cells();
    if songs.len() < required {
        return Err(BingoError::InsufficientSongs {
            layout,
            required,
            available: songs.len(),
        });
    }

    let mut seen = HashSet::new();
    for song in songs {
        if !seen.insert(song.id.as_str()) {
            return Err(BingoError::DuplicateSongId(song.id.clone()));
        }
    }
    Ok(())
}

fn artist_key(song: &Song) -> String {
    song.artist.trim().to_lowercase()
}

/// Fills the grid row-major from the seeded permutation of `songs`.
///
/// `cursor` always points at the first song of the permutation that is not
/// on the card yet. Without artist constraints that song is placed; with
/// them, the scan moves forward (wrapping, at most one lap) to the first
/// unused song whose artist is new to the row, and the skipped songs stay
/// available for later cells.
fn build_grid(songs: &[Song], seed: &str, options: &CardOptions) -> Vec<Vec<Cell>> {
    let layout = options.layout;
    let n = songs.len();

    let mut order: Vec<usize> = (0..n).collect();
    SeededRng::new(seed).shuffle(&mut order);

    let mut used = vec![false; n];
    let mut cursor = 0;
    let mut grid = Vec::with_capacity(layout.rows());

    for r in 0..layout.rows() {
        let mut row = Vec::with_capacity(layout.cols());
        let mut row_artists: Vec<String> = Vec::new();

        for c in 0..layout.cols() {
            if layout.free_space() == Some((r, c)) {
                row.push(Cell::FreeSpace);
                continue;
            }

            while cursor < n && used[cursor] {
                cursor += 1;
            }

            let mut pick = cursor;
            if options.prevent_duplicate_artist
                && row_artists.contains(&artist_key(&songs[order[cursor]]))
            {
                for attempt in 1..n {
                    let k = (cursor + attempt) % n;
                    if !used[k] && !row_artists.contains(&artist_key(&songs[order[k]])) {
                        pick = k;
                        break;
                    }
                }
            }

            used[pick] = true;
            let song = &songs[order[pick]];
            row_artists.push(artist_key(song));
            row.push(Cell::Song(song.id.clone()));
        }

        grid.push(row);
    }

    grid
}
