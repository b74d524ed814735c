use std::{cmp::Ordering, collections::HashSet};

use chrono::Utc;
use lazy_static::lazy_static;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;

use crate::types::{Layout, Song, WinMode};

const MAX_TITLE_LENGTH: usize = 60;
const MAX_ARTIST_LENGTH: usize = 40;

lazy_static! {
    static ref BRACKETED: Regex = Regex::new(r"[\(\[][^\)\]]*[\)\]]").unwrap();
    static ref NOISE: Vec<Regex> = [
        r"(?i)official\s*music\s*video",
        r"(?i)official\s*video",
        r"(?i)official\s*audio",
        r"(?i)lyric\s*video",
        r"(?i)official\s*lyric\s*video",
        r"(?i)music\s*video",
        r"(?i)visualizer",
        r"(?i)\bofficial\b",
        r"(?i)\bvideo\b",
        r"(?i)\baudio\b",
        r"(?i)\blyrics?\b",
        r"(?i)\bremix\b",
        r"(?i)\bremastered\b",
        r"(?i)\blive\b",
        r"(?i)\bperformance\b",
        r"(?i)\bfeat\.?",
        r"(?i)\bft\.?",
        r"(?i)v[íi]deo\s*oficial",
        r"(?i)audio\s*oficial",
        r"(?i)letra\s*oficial",
        r"(?i)con\s*letra",
        r"(?i)\boficial\b",
        r"(?i)\bv[íi]deo\b",
        r"(?i)\bletras?\b",
        r"(?i)\ben\s*vivo\b",
        r"(?i)\bpresentaci[óo]n\b",
        r"(?i)\bpart\.?\s*\d+\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref EDGES: Regex = Regex::new(r"^[\s\-\|]+|[\s\-\|]+$").unwrap();
    static ref PIPES: Regex = Regex::new(r"\s*\|\s*").unwrap();
}

/// Title and artist as they are printed on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSong {
    pub title: String,
    pub artist: String,
}

/// Produces a printable seed for cards that were not given one.
pub fn generate_seed() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Produces a card identifier such as `CARD-1697500000000-k3j9x0a1b`.
pub fn generate_card_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("CARD-{}-{}", Utc::now().timestamp_millis(), suffix)
}

pub fn parse_layout(s: &str) -> Result<Layout, String> {
    let normalized = s.trim().to_ascii_lowercase().replace('×', "x");
    Layout::ALL
        .into_iter()
        .find(|layout| layout.as_str() == normalized)
        .ok_or_else(|| {
            format!(
                "invalid value '{}'. Allowed values: {}",
                s.trim(),
                Layout::ALL.map(|l| l.as_str()).join(", ")
            )
        })
}

pub fn parse_win_mode(s: &str) -> Result<WinMode, String> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "full_card" | "full" | "card" => Ok(WinMode::FullCard),
        "line" => Ok(WinMode::Line),
        other => Err(format!(
            "invalid value '{}'. Allowed values: full_card, line",
            other
        )),
    }
}

/// Keeps the first song for every id.
pub fn remove_duplicate_songs(songs: &mut Vec<Song>) {
    let mut seen_ids = HashSet::new();
    songs.retain(|song| seen_ids.insert(song.id.clone()));
}

pub fn sort_songs_by_artist_and_title(songs: &mut [Song]) {
    songs.sort_by(|a, b| {
        match a.artist.to_lowercase().cmp(&b.artist.to_lowercase()) {
            Ordering::Equal => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            other => other,
        }
    });
}

/// Strips bracketed text and upload noise ("Official Video", "Lyrics",
/// "En Vivo", ...) from a song title.
pub fn clean_song_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let mut cleaned = BRACKETED.replace_all(title, "").into_owned();
    for pattern in NOISE.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }

    cleaned = WHITESPACE.replace_all(&cleaned, " ").into_owned();
    cleaned = EDGES.replace_all(&cleaned, "").into_owned();
    cleaned = PIPES.replace_all(&cleaned, " ").into_owned();

    cleaned.trim().to_string()
}

/// Prepares a song for a card cell.
///
/// When no artist is set and the title looks like `Artist - Title`, the
/// title is split. Titles that clean down to fewer than 3 characters fall
/// back to the raw title.
pub fn format_song_for_bingo(song: &Song) -> FormattedSong {
    let mut title = song.title.clone();
    let mut artist = song.artist.clone();

    if title.contains(" - ") && artist.trim().is_empty() {
        let parts: Vec<&str> = title.split(" - ").collect();
        if !parts[0].trim().is_empty() {
            artist = parts[0].trim().to_string();
            title = parts[1..].join(" - ").trim().to_string();
        }
    }

    let cleaned = clean_song_title(&title);
    let title = if cleaned.trim().is_empty() || cleaned.chars().count() < 3 {
        song.title.clone()
    } else {
        cleaned
    };

    FormattedSong {
        title: truncate(&title, MAX_TITLE_LENGTH),
        artist: truncate(&artist, MAX_ARTIST_LENGTH),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max - 3).collect();
    format!("{}...", head)
}
