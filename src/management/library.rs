use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{config, error::BingoError, types::Song};

/// Read access to a set of songs.
pub trait SongCatalog {
    fn find_all(&self) -> &[Song];

    fn find_by_id(&self, id: &str) -> Option<&Song> {
        self.find_all().iter().find(|s| s.id == id)
    }

    /// Songs that can be played in a session.
    fn playable(&self) -> Vec<Song> {
        self.find_all()
            .iter()
            .filter(|s| s.has_audio)
            .cloned()
            .collect()
    }
}

/// The song library, stored as a JSON array.
pub struct LibraryManager {
    path: PathBuf,
    songs: Vec<Song>,
}

impl LibraryManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            songs: Vec::new(),
        }
    }

    /// Loads the library from the data directory.
    pub async fn load() -> Result<Self, BingoError> {
        Self::load_from(config::library_path()).await
    }

    /// Loads a library file. A missing file is an empty library.
    pub async fn load_from(path: PathBuf) -> Result<Self, BingoError> {
        if !path.is_file() {
            return Ok(Self::new(path));
        }

        let json = async_fs::read_to_string(&path).await?;
        let songs: Vec<Song> = serde_json::from_str(&json)?;
        Ok(Self { path, songs })
    }

    /// Reads songs from an arbitrary JSON file without adding them.
    pub async fn read_songs(path: &Path) -> Result<Vec<Song>, BingoError> {
        let json = async_fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json)?)
    }

    pub async fn persist(&self) -> Result<(), BingoError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.songs)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn insert(&mut self, song: Song) -> Result<(), BingoError> {
        song.validate()?;
        if self.find_by_id(&song.id).is_some() {
            return Err(BingoError::DuplicateSongId(song.id));
        }
        self.songs.push(song);
        Ok(())
    }

    /// Inserts all songs or none of them.
    pub fn insert_many(&mut self, songs: Vec<Song>) -> Result<usize, BingoError> {
        let mut seen: HashSet<&str> = self.songs.iter().map(|s| s.id.as_str()).collect();
        for song in &songs {
            song.validate()?;
            if !seen.insert(song.id.as_str()) {
                return Err(BingoError::DuplicateSongId(song.id.clone()));
            }
        }

        let count = songs.len();
        self.songs.extend(songs);
        Ok(count)
    }

    /// Case-insensitive match on title, artist and album.
    pub fn search(&self, query: &str) -> Vec<&Song> {
        let needle = query.trim().to_lowercase();
        self.songs
            .iter()
            .filter(|s| {
                s.title.to_lowercase().contains(&needle)
                    || s.artist.to_lowercase().contains(&needle)
                    || s.album
                        .as_deref()
                        .is_some_and(|a| a.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Replaces the stored song with the same id.
    pub fn update(&mut self, song: Song) -> Result<(), BingoError> {
        song.validate()?;
        match self.songs.iter_mut().find(|s| s.id == song.id) {
            Some(existing) => {
                *existing = song;
                Ok(())
            }
            None => Err(BingoError::UnknownSong(song.id)),
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.songs.len();
        self.songs.retain(|s| s.id != id);
        self.songs.len() != before
    }

    pub fn delete_many<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let ids: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let before = self.songs.len();
        self.songs.retain(|s| !ids.contains(s.id.as_str()));
        before - self.songs.len()
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }

    pub fn count(&self) -> usize {
        self.songs.len()
    }
}

impl SongCatalog for LibraryManager {
    fn find_all(&self) -> &[Song] {
        &self.songs
    }
}
