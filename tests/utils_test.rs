use musicbingo::types::{Layout, Song, WinMode};
use musicbingo::utils::*;

// Helper function to create a test song
fn create_test_song(id: &str, title: &str, artist: &str) -> Song {
    Song::new(id, title, artist)
}

#[test]
fn test_generate_seed() {
    let seed = generate_seed();

    // Should be exactly 12 characters
    assert_eq!(seed.len(), 12);

    // Should contain only alphanumeric characters
    assert!(seed.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated seeds should be different
    assert_ne!(seed, generate_seed());
}

#[test]
fn test_generate_card_id() {
    let id = generate_card_id();
    let parts: Vec<&str> = id.split('-').collect();

    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "CARD");
    assert!(parts[1].parse::<i64>().is_ok());
    assert_eq!(parts[2].len(), 9);
    assert!(
        parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    );

    assert_ne!(id, generate_card_id());
}

#[test]
fn test_parse_layout() {
    assert_eq!(parse_layout("3x5"), Ok(Layout::ThreeByFive));
    assert_eq!(parse_layout("5x5"), Ok(Layout::FiveByFive));
    assert_eq!(parse_layout(" 5X5 "), Ok(Layout::FiveByFive));
    assert_eq!(parse_layout("3×5"), Ok(Layout::ThreeByFive));

    let err = parse_layout("4x4").unwrap_err();
    assert!(err.contains("invalid value '4x4'"));
    assert!(err.contains("3x5, 5x5"));
}

#[test]
fn test_parse_win_mode() {
    assert_eq!(parse_win_mode("full_card"), Ok(WinMode::FullCard));
    assert_eq!(parse_win_mode("full-card"), Ok(WinMode::FullCard));
    assert_eq!(parse_win_mode("FULL"), Ok(WinMode::FullCard));
    assert_eq!(parse_win_mode("line"), Ok(WinMode::Line));
    assert!(parse_win_mode("diagonal").is_err());
}

#[test]
fn test_remove_duplicate_songs() {
    let mut songs = vec![
        create_test_song("1", "First", "A"),
        create_test_song("2", "Second", "B"),
        create_test_song("1", "First again", "A"),
        create_test_song("3", "Third", "C"),
        create_test_song("2", "Second again", "B"),
    ];

    remove_duplicate_songs(&mut songs);

    assert_eq!(songs.len(), 3);
    let ids: Vec<&str> = songs.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    // first occurrence wins
    assert_eq!(songs[0].title, "First");
}

#[test]
fn test_sort_songs_by_artist_and_title() {
    let mut songs = vec![
        create_test_song("1", "Zebra", "beta"),
        create_test_song("2", "apple", "Alpha"),
        create_test_song("3", "Banana", "alpha"),
        create_test_song("4", "Cherry", "Beta"),
    ];

    sort_songs_by_artist_and_title(&mut songs);

    let ids: Vec<&str> = songs.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3", "4", "1"]);
}

#[test]
fn test_clean_song_title() {
    assert_eq!(clean_song_title("Song Name (Official Video)"), "Song Name");
    assert_eq!(clean_song_title("Song Name [Lyrics]"), "Song Name");
    assert_eq!(clean_song_title("Song Name - Official Music Video"), "Song Name");
    assert_eq!(clean_song_title("Canción | Video Oficial"), "Canción");
    assert_eq!(clean_song_title("Tema En Vivo"), "Tema");
    assert_eq!(clean_song_title("   Spaced    Out   "), "Spaced Out");
    assert_eq!(clean_song_title(""), "");
}

#[test]
fn test_format_song_splits_artist_from_title() {
    let song = create_test_song("1", "Queen - Bohemian Rhapsody (Official Video)", "");

    let formatted = format_song_for_bingo(&song);
    assert_eq!(formatted.artist, "Queen");
    assert_eq!(formatted.title, "Bohemian Rhapsody");
}

#[test]
fn test_format_song_keeps_existing_artist() {
    let song = create_test_song("1", "Live - Forever", "Someone");

    let formatted = format_song_for_bingo(&song);
    assert_eq!(formatted.artist, "Someone");
}

#[test]
fn test_format_song_falls_back_to_raw_title() {
    // cleaning would leave nothing useful
    let song = create_test_song("1", "(Official Video)", "Band");

    let formatted = format_song_for_bingo(&song);
    assert_eq!(formatted.title, "(Official Video)");
}

#[test]
fn test_format_song_truncates() {
    let long_title = "A".repeat(80);
    let long_artist = "B".repeat(50);
    let song = create_test_song("1", &long_title, &long_artist);

    let formatted = format_song_for_bingo(&song);
    assert_eq!(formatted.title.chars().count(), 60);
    assert!(formatted.title.ends_with("..."));
    assert_eq!(formatted.artist.chars().count(), 40);
    assert!(formatted.artist.ends_with("..."));
}
