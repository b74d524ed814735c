use musicbingo::error::BingoError;
use musicbingo::management::{LibraryManager, SongCatalog};
use musicbingo::types::Song;
use tempfile::TempDir;

// Helper function to create a test song
fn create_test_song(id: &str, title: &str, artist: &str) -> Song {
    let mut song = Song::new(id, title, artist);
    song.has_audio = true;
    song.youtube_id = Some(format!("yt-{}", id));
    song
}

fn library_in(dir: &TempDir) -> LibraryManager {
    LibraryManager::new(dir.path().join("library.json"))
}

#[tokio::test]
async fn test_missing_file_is_empty_library() {
    let dir = TempDir::new().unwrap();
    let library = LibraryManager::load_from(dir.path().join("nope.json"))
        .await
        .unwrap();

    assert_eq!(library.count(), 0);
    assert!(library.find_all().is_empty());
}

#[tokio::test]
async fn test_persist_and_load() {
    let dir = TempDir::new().unwrap();
    let mut library = LibraryManager::new(dir.path().join("nested/dir/library.json"));
    library
        .insert(create_test_song("a", "Bohemian Rhapsody", "Queen"))
        .unwrap();
    library
        .insert(create_test_song("b", "Africa", "Toto"))
        .unwrap();
    library.persist().await.unwrap();

    let loaded = LibraryManager::load_from(dir.path().join("nested/dir/library.json"))
        .await
        .unwrap();
    assert_eq!(loaded.count(), 2);
    assert_eq!(loaded.find_all(), library.find_all());
}

#[tokio::test]
async fn test_song_json_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("songs.json");
    std::fs::write(
        &path,
        r#"[
            {"id": "x1", "title": "Song", "artist": "Band", "durationSeconds": 180,
             "cueIn": 30, "cueOut": 45, "hasAudio": true, "youtubeId": "abc"},
            {"id": "x2", "title": "Other", "artist": "Band"}
        ]"#,
    )
    .unwrap();

    let songs = LibraryManager::read_songs(&path).await.unwrap();
    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0].cue_in, 30.0);
    assert_eq!(songs[0].youtube_id.as_deref(), Some("abc"));
    assert!(!songs[1].has_audio);
    assert_eq!(songs[1].clip_duration(), None);
}

#[test]
fn test_insert_rejects_duplicate_id() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(&dir);
    library.insert(create_test_song("a", "One", "X")).unwrap();

    let result = library.insert(create_test_song("a", "Two", "Y"));
    assert!(matches!(result, Err(BingoError::DuplicateSongId(id)) if id == "a"));
    assert_eq!(library.count(), 1);
}

#[test]
fn test_insert_validates_cue_window() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(&dir);

    let mut backwards = create_test_song("a", "One", "X");
    backwards.cue_in = 40.0;
    backwards.cue_out = 20.0;
    assert!(matches!(
        library.insert(backwards),
        Err(BingoError::InvalidSong { .. })
    ));

    let mut too_long = create_test_song("b", "Two", "X");
    too_long.duration_seconds = 100.0;
    too_long.cue_in = 90.0;
    too_long.cue_out = 120.0;
    assert!(matches!(
        library.insert(too_long),
        Err(BingoError::InvalidSong { .. })
    ));

    assert_eq!(library.count(), 0);
}

#[test]
fn test_insert_many_is_all_or_nothing() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(&dir);
    library.insert(create_test_song("a", "One", "X")).unwrap();

    let result = library.insert_many(vec![
        create_test_song("b", "Two", "X"),
        create_test_song("a", "Again", "X"),
    ]);
    assert!(result.is_err());
    assert_eq!(library.count(), 1);

    let added = library
        .insert_many(vec![
            create_test_song("b", "Two", "X"),
            create_test_song("c", "Three", "X"),
        ])
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(library.count(), 3);
}

#[test]
fn test_search_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(&dir);
    let mut with_album = create_test_song("a", "Under Pressure", "Queen");
    with_album.album = Some("Hot Space".to_string());
    library.insert(with_album).unwrap();
    library
        .insert(create_test_song("b", "Africa", "Toto"))
        .unwrap();

    assert_eq!(library.search("queen").len(), 1);
    assert_eq!(library.search("PRESSURE").len(), 1);
    assert_eq!(library.search("hot space")[0].id, "a");
    assert_eq!(library.search("a").len(), 2);
    assert!(library.search("zzz").is_empty());
}

#[test]
fn test_find_update_delete() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(&dir);
    library
        .insert_many(vec![
            create_test_song("a", "One", "X"),
            create_test_song("b", "Two", "Y"),
            create_test_song("c", "Three", "Z"),
        ])
        .unwrap();

    assert_eq!(library.find_by_id("b").unwrap().title, "Two");
    assert!(library.find_by_id("zz").is_none());

    let mut renamed = create_test_song("b", "Two (Remastered)", "Y");
    renamed.cue_in = 10.0;
    renamed.cue_out = 25.0;
    library.update(renamed).unwrap();
    assert_eq!(library.find_by_id("b").unwrap().title, "Two (Remastered)");

    assert!(matches!(
        library.update(create_test_song("zz", "Nope", "N")),
        Err(BingoError::UnknownSong(_))
    ));

    assert!(library.delete("a"));
    assert!(!library.delete("a"));
    assert_eq!(library.delete_many(&["b", "c", "zz"]), 2);
    assert_eq!(library.count(), 0);
}

#[test]
fn test_playable_and_clear() {
    let dir = TempDir::new().unwrap();
    let mut library = library_in(&dir);
    let mut silent = create_test_song("b", "Silent", "X");
    silent.has_audio = false;
    library
        .insert_many(vec![create_test_song("a", "Loud", "X"), silent])
        .unwrap();

    let playable = library.playable();
    assert_eq!(playable.len(), 1);
    assert_eq!(playable[0].id, "a");

    library.clear();
    assert_eq!(library.count(), 0);
}
