use musicbingo::bingo::{BingoCard, CardOptions, check_win, generate_card, mark_drawn};
use musicbingo::types::{Layout, Song, WinMode};

// Helper function to create songs s1..sN
fn create_songs(count: usize) -> Vec<Song> {
    (1..=count)
        .map(|i| Song::new(format!("s{}", i), format!("Song {}", i), format!("Artist {}", i)))
        .collect()
}

fn make_card(layout: Layout, pool: usize) -> BingoCard {
    let options = CardOptions {
        seed: Some("win".to_string()),
        layout,
        ..Default::default()
    };
    generate_card(&create_songs(pool), &options).unwrap()
}

fn ids_on(card: &BingoCard) -> Vec<String> {
    card.song_ids().into_iter().map(String::from).collect()
}

#[test]
fn test_full_card_winner_when_all_drawn() {
    for layout in Layout::ALL {
        let card = make_card(layout, 30);
        let drawn = ids_on(&card);

        let result = check_win(&card, &drawn, WinMode::FullCard);
        assert!(result.is_winner);
        assert!(result.supported);
        assert_eq!(result.mode, WinMode::FullCard);
        assert_eq!(result.missing, 0);
    }
}

#[test]
fn test_missing_any_song_is_not_a_win() {
    let card = make_card(Layout::ThreeByFive, 30);
    let all = ids_on(&card);

    for skip in 0..all.len() {
        let drawn: Vec<&String> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, id)| id)
            .collect();

        let result = check_win(&card, &drawn, WinMode::FullCard);
        assert!(!result.is_winner, "won without {}", all[skip]);
        assert_eq!(result.missing, 1);
    }
}

#[test]
fn test_free_space_needs_no_call() {
    let card = make_card(Layout::FiveByFive, 24);
    let drawn = ids_on(&card);
    assert_eq!(drawn.len(), 24);

    assert!(check_win(&card, &drawn, WinMode::FullCard).is_winner);
}

#[test]
fn test_extra_drawn_songs_do_not_matter() {
    let card = make_card(Layout::ThreeByFive, 40);
    let drawn: Vec<String> = (1..=40).map(|i| format!("s{}", i)).collect();

    assert!(check_win(&card, &drawn, WinMode::FullCard).is_winner);
}

#[test]
fn test_nothing_drawn() {
    let card = make_card(Layout::ThreeByFive, 15);
    let drawn: Vec<String> = Vec::new();

    let result = check_win(&card, &drawn, WinMode::FullCard);
    assert!(!result.is_winner);
    assert_eq!(result.missing, 15);
    assert_eq!(result.message(), "Songs still missing");
}

#[test]
fn test_line_mode_is_unsupported() {
    let card = make_card(Layout::ThreeByFive, 15);
    let drawn = ids_on(&card);

    // even a complete card is not reported as a line win
    let result = check_win(&card, &drawn, WinMode::Line);
    assert!(!result.supported);
    assert!(!result.is_winner);
    assert_eq!(result.mode, WinMode::Line);
    assert_eq!(result.message(), "This win mode is not supported yet");
}

#[test]
fn test_check_win_does_not_mark() {
    let card = make_card(Layout::ThreeByFive, 15);
    let drawn = ids_on(&card);

    check_win(&card, &drawn, WinMode::FullCard);
    assert!(card.marked().is_empty());
}

#[test]
fn test_mark_drawn_counts_new_marks() {
    let mut card = make_card(Layout::ThreeByFive, 20);
    let on_card = ids_on(&card);

    let drawn = vec![on_card[0].clone(), on_card[1].clone(), "s999".to_string()];
    assert_eq!(mark_drawn(&mut card, &drawn), 2);
    assert_eq!(mark_drawn(&mut card, &drawn), 0);
    assert_eq!(card.marked().len(), 2);
}
