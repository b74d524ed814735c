use std::time::Duration;

use musicbingo::bingo::{AudioPort, CatalogAudioPort};
use musicbingo::error::BingoError;
use musicbingo::types::Song;
use tokio::time::sleep;

// Helper function to create a test song with audio
fn create_test_song(id: &str) -> Song {
    let mut song = Song::new(id, "Title", "Artist");
    song.has_audio = true;
    song
}

#[tokio::test]
async fn test_resolves_stored_audio_url() {
    let mut song = create_test_song("a");
    song.audio_url = Some("https://cdn.example.com/a.mp3".to_string());
    song.youtube_id = Some("ignored".to_string());
    song.duration_seconds = 210.0;

    let resolved = CatalogAudioPort::quiet()
        .resolve_playable_url(&song)
        .await
        .unwrap();
    assert_eq!(resolved.url, "https://cdn.example.com/a.mp3");
    assert_eq!(resolved.duration_hint, Some(210.0));
}

#[tokio::test]
async fn test_resolves_youtube_url_at_cue_in() {
    let mut song = create_test_song("b");
    song.youtube_id = Some("dQw4w9WgXcQ".to_string());
    song.cue_in = 42.7;
    song.cue_out = 57.0;

    let resolved = CatalogAudioPort::quiet()
        .resolve_playable_url(&song)
        .await
        .unwrap();
    assert_eq!(resolved.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s");
    assert_eq!(resolved.duration_hint, None);
}

#[tokio::test]
async fn test_resolution_fails_without_source() {
    let song = create_test_song("c");
    let result = CatalogAudioPort::quiet().resolve_playable_url(&song).await;
    assert!(matches!(result, Err(BingoError::AudioResolution { song_id, .. }) if song_id == "c"));

    let mut silent = create_test_song("d");
    silent.has_audio = false;
    silent.youtube_id = Some("x".to_string());
    let result = CatalogAudioPort::quiet().resolve_playable_url(&silent).await;
    assert!(matches!(result, Err(BingoError::AudioResolution { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_excludes_pauses() {
    let port = CatalogAudioPort::quiet();
    assert_eq!(port.elapsed(), 0.0);

    port.play("https://example.com").unwrap();
    sleep(Duration::from_secs(3)).await;
    port.pause();
    sleep(Duration::from_secs(10)).await;
    assert!((port.elapsed() - 3.0).abs() < 0.01);

    port.resume();
    sleep(Duration::from_secs(2)).await;
    assert!((port.elapsed() - 5.0).abs() < 0.01);

    port.stop();
    assert_eq!(port.elapsed(), 0.0);
}
