use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    management::{LibraryManager, SongCatalog},
    success,
    types::{Song, SongTableRow},
    utils, warning,
};

pub async fn list_songs(search: Option<String>) {
    let library = match LibraryManager::load().await {
        Ok(l) => l,
        Err(e) => error!("Cannot load the song library. Err: {}", e),
    };

    let mut songs: Vec<Song> = match search {
        Some(query) => library.search(&query).into_iter().cloned().collect(),
        None => library.find_all().to_vec(),
    };

    if songs.is_empty() {
        warning!("No songs found. Add some with 'musicbingo library import <file>'");
        return;
    }

    utils::sort_songs_by_artist_and_title(&mut songs);
    let rows: Vec<SongTableRow> = songs.iter().map(SongTableRow::from).collect();
    println!("{}", Table::new(rows));

    let playable = songs.iter().filter(|s| s.has_audio).count();
    success!("{} songs, {} playable", songs.len(), playable);
}

pub async fn import_songs(file: PathBuf) {
    let mut songs = match LibraryManager::read_songs(&file).await {
        Ok(s) => s,
        Err(e) => error!("Cannot read songs from {}. Err: {}", file.display(), e),
    };

    let mut library = match LibraryManager::load().await {
        Ok(l) => l,
        Err(e) => error!("Cannot load the song library. Err: {}", e),
    };

    utils::remove_duplicate_songs(&mut songs);

    let pb = ProgressBar::new(songs.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .progress_chars("=> "),
    );

    let mut added = 0;
    let mut skipped = Vec::new();
    for song in songs {
        pb.set_message(song.title.clone());
        let id = song.id.clone();
        match library.insert(song) {
            Ok(()) => added += 1,
            Err(e) => skipped.push((id, e)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (id, e) in &skipped {
        warning!("Skipped '{}': {}", id, e);
    }

    if let Err(e) = library.persist().await {
        error!("Cannot save the song library. Err: {}", e);
    }

    success!(
        "Imported {} songs into {} ({} in library)",
        added,
        library.path().display(),
        library.count()
    );
}

pub async fn remove_song(id: String) {
    let mut library = match LibraryManager::load().await {
        Ok(l) => l,
        Err(e) => error!("Cannot load the song library. Err: {}", e),
    };

    if !library.delete(&id) {
        warning!("No song with id '{}' in the library", id);
        return;
    }

    if let Err(e) = library.persist().await {
        error!("Cannot save the song library. Err: {}", e);
    }
    success!("Removed '{}'", id);
}
