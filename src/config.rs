//! Configuration management for musicbingo.
//!
//! Values are read from environment variables, which may be provided by a
//! `.env` file in the local data directory. Every setting has a default so
//! the application runs without any configuration at all:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

use crate::{types::Layout, utils};

const APP_DIR: &str = "musicbingo";
const DEFAULT_CLIP_SECONDS: u64 = 15;

/// Loads environment variables from `musicbingo/.env` in the local data directory.
///
/// Creates the directory when it is missing. A missing `.env` file is not an
/// error; a file that exists but cannot be parsed is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/musicbingo/.env`
/// - macOS: `~/Library/Application Support/musicbingo/.env`
/// - Windows: `%LOCALAPPDATA%/musicbingo/.env`
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    async_fs::create_dir_all(&path)
        .await
        .map_err(|e| e.to_string())?;

    path.push(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))
}

/// Directory holding the song library and the saved game.
///
/// `MUSICBINGO_DATA_DIR` overrides the platform data directory.
pub fn data_dir() -> PathBuf {
    match env::var("MUSICBINGO_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(APP_DIR);
            path
        }
    }
}

pub fn library_path() -> PathBuf {
    data_dir().join("library.json")
}

pub fn game_path() -> PathBuf {
    data_dir().join("game.json")
}

/// Clip length used for songs without a cue window.
///
/// Reads `MUSICBINGO_CLIP_SECONDS`, falling back to 15 seconds when the
/// variable is unset, unparsable or zero.
pub fn fallback_clip() -> Duration {
    let seconds = env::var("MUSICBINGO_CLIP_SECONDS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_CLIP_SECONDS);
    Duration::from_secs(seconds)
}

/// Card layout used when the command line does not name one (`MUSICBINGO_LAYOUT`).
pub fn default_layout() -> Layout {
    env::var("MUSICBINGO_LAYOUT")
        .ok()
        .and_then(|v| utils::parse_layout(&v).ok())
        .unwrap_or_default()
}

/// Whether drawn songs start playing right away (`MUSICBINGO_AUTO_PLAY`).
pub fn auto_play() -> bool {
    match env::var("MUSICBINGO_AUTO_PLAY") {
        Ok(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
        Err(_) => true,
    }
}
