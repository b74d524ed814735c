use musicbingo::bingo::render::escape_html;
use musicbingo::bingo::{
    CardOptions, CardRenderer, CardView, CellLabel, HtmlRenderer, TableRenderer, generate_card,
};
use musicbingo::error::BingoError;
use musicbingo::types::{Layout, Song};

// Helper function to create songs s1..sN
fn create_songs(count: usize) -> Vec<Song> {
    (1..=count)
        .map(|i| Song::new(format!("s{}", i), format!("Song {}", i), format!("Artist {}", i)))
        .collect()
}

fn five_by_five(songs: &[Song]) -> musicbingo::bingo::BingoCard {
    let options = CardOptions {
        seed: Some("render".to_string()),
        layout: Layout::FiveByFive,
        ..Default::default()
    };
    generate_card(songs, &options).unwrap()
}

#[test]
fn test_view_resolves_every_cell() {
    let songs = create_songs(24);
    let card = five_by_five(&songs);

    let view = CardView::from_songs(&card, &songs).unwrap();

    assert_eq!(view.card_id, card.id());
    assert_eq!(view.layout, Layout::FiveByFive);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.rows[2][2], CellLabel::Free);

    let song_id = card.song_at(0, 0).unwrap();
    let song = songs.iter().find(|s| s.id == song_id).unwrap();
    match &view.rows[0][0] {
        CellLabel::Song { label, marked } => {
            assert_eq!(label.title, song.title);
            assert_eq!(label.artist, song.artist);
            assert!(!marked);
        }
        CellLabel::Free => panic!("(0, 0) is not the free space"),
    }
}

#[test]
fn test_view_fails_on_unknown_song() {
    let songs = create_songs(24);
    let card = five_by_five(&songs);

    let result = CardView::from_songs(&card, &songs[..10]);
    assert!(matches!(result, Err(BingoError::UnknownSong(_))));
}

#[test]
fn test_view_labels_are_cleaned() {
    let mut songs = create_songs(15);
    songs[0].title = "Song 1 (Official Music Video)".to_string();
    let card = generate_card(&songs, &CardOptions::with_seed("clean")).unwrap();

    let view = CardView::new(&card, |id| songs.iter().find(|s| s.id == id)).unwrap();
    let titles: Vec<String> = view
        .rows
        .iter()
        .flatten()
        .filter_map(|cell| match cell {
            CellLabel::Song { label, .. } => Some(label.title.clone()),
            CellLabel::Free => None,
        })
        .collect();

    assert!(titles.contains(&"Song 1".to_string()));
    assert!(!titles.iter().any(|t| t.contains("Official")));
}

#[test]
fn test_view_carries_marks() {
    let songs = create_songs(24);
    let mut card = five_by_five(&songs);
    let marked_id = card.song_at(4, 4).unwrap().to_string();
    card.mark(&marked_id);

    let view = CardView::from_songs(&card, &songs).unwrap();
    assert!(matches!(&view.rows[4][4], CellLabel::Song { marked: true, .. }));

    let text = TableRenderer { show_marks: true }.render(&view);
    assert!(text.contains("✓ "));
    let plain = TableRenderer::default().render(&view);
    assert!(!plain.contains("✓ "));
}

#[test]
fn test_table_renderer_output() {
    let songs = create_songs(24);
    let card = five_by_five(&songs);
    let view = CardView::from_songs(&card, &songs).unwrap();

    let text = TableRenderer::default().render(&view);
    assert!(text.starts_with(card.id()));
    assert!(text.contains("seed render"));
    assert!(text.contains("FREE"));
    for id in card.song_ids() {
        let song = songs.iter().find(|s| s.id == id).unwrap();
        assert!(text.contains(&song.title));
    }
}

#[test]
fn test_html_renderer_single_card() {
    let songs = create_songs(24);
    let card = five_by_five(&songs);
    let view = CardView::from_songs(&card, &songs).unwrap();

    let html = HtmlRenderer::default().render(&view);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Music Bingo</title>"));
    assert_eq!(html.matches("<section class=\"card\"").count(), 1);
    assert_eq!(html.matches("<td class=\"free\">FREE</td>").count(), 1);
    assert_eq!(html.matches("<td>").count(), 24);
}

#[test]
fn test_html_renderer_many_cards_one_page() {
    let songs = create_songs(30);
    let cards = musicbingo::bingo::generate_cards(&songs, 3, &CardOptions::with_base_seed("p"))
        .unwrap();
    let views: Vec<CardView> = cards
        .iter()
        .map(|c| CardView::from_songs(c, &songs).unwrap())
        .collect();

    let renderer = HtmlRenderer {
        title: Some("Friday <Quiz>".to_string()),
    };
    let html = renderer.render_all(&views);

    assert_eq!(html.matches("<!DOCTYPE html>").count(), 1);
    assert_eq!(html.matches("<section class=\"card\"").count(), 3);
    assert!(html.contains("Friday &lt;Quiz&gt;"));
    assert!(!html.contains("<Quiz>"));
}

#[test]
fn test_html_escapes_song_text() {
    let mut songs = create_songs(15);
    songs[0].title = "Rock & Roll <Tonight>".to_string();
    songs[0].artist = "\"The\" Band's".to_string();
    let card = generate_card(&songs, &CardOptions::with_seed("escape")).unwrap();
    let view = CardView::from_songs(&card, &songs).unwrap();

    let html = HtmlRenderer::default().render(&view);
    assert!(html.contains("Rock &amp; Roll &lt;Tonight&gt;"));
    assert!(html.contains("&quot;The&quot; Band&#39;s"));
    assert!(!html.contains("<Tonight>"));
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("plain"), "plain");
    assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
}
