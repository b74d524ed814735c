use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    bingo::{
        CardOptions, CardRenderer, CardView, HtmlRenderer, TableRenderer, generate_card,
        generator::batch_seed,
    },
    error, info,
    management::{GameManager, LibraryManager, SongCatalog},
    success,
    types::{CardTableRow, Layout, Song, WinMode},
    utils, warning,
};

pub struct GenerateOptions {
    pub count: usize,
    pub seed: Option<String>,
    pub layout: Layout,
    pub prevent_duplicate_artist: bool,
    pub html: Option<PathBuf>,
}

async fn load_pool() -> Vec<Song> {
    let library = match LibraryManager::load().await {
        Ok(l) => l,
        Err(e) => error!("Cannot load the song library. Err: {}", e),
    };

    // cards only hold songs a session can actually draw
    let mut songs = library.playable();
    utils::sort_songs_by_artist_and_title(&mut songs);
    songs
}

async fn load_game() -> GameManager {
    match GameManager::load().await {
        Ok(g) => g,
        Err(e) => error!("Cannot load the saved game. Err: {}", e),
    }
}

pub async fn generate(opts: GenerateOptions) {
    let songs = load_pool().await;
    let mut game = load_game().await;

    if !game.is_active() {
        warning!("No game is running. Cards are saved anyway; start one with 'musicbingo game new'");
    }

    let pb = ProgressBar::new(opts.count as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .progress_chars("=> "),
    );
    pb.set_message("Generating cards...");

    let mut cards = Vec::with_capacity(opts.count);
    for index in 0..opts.count {
        let seed = match (&opts.seed, opts.count) {
            (Some(seed), 1) => seed.clone(),
            (base, _) => batch_seed(base.as_deref(), index),
        };
        let options = CardOptions {
            seed: Some(seed),
            base_seed: None,
            prevent_duplicate_artist: opts.prevent_duplicate_artist,
            layout: opts.layout,
        };

        match generate_card(&songs, &options) {
            Ok(card) => cards.push(card),
            Err(e) => {
                pb.finish_and_clear();
                error!("Cannot generate cards. Err: {}", e);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let rows: Vec<CardTableRow> = cards.iter().map(CardTableRow::from).collect();
    println!("{}", Table::new(rows));

    if let Some(path) = opts.html {
        let views: Result<Vec<CardView>, _> =
            cards.iter().map(|c| CardView::from_songs(c, &songs)).collect();
        let html = match views {
            Ok(views) => HtmlRenderer::default().render_all(&views),
            Err(e) => error!("Cannot render cards. Err: {}", e),
        };
        if let Err(e) = async_fs::write(&path, html).await {
            error!("Cannot write {}. Err: {}", path.display(), e);
        }
        success!("Printable cards written to {}", path.display());
    }

    let added = game.add_cards(cards);
    if let Err(e) = game.persist().await {
        error!("Cannot save the game. Err: {}", e);
    }
    success!("Generated {} {} cards", added, opts.layout);
}

pub async fn list_cards() {
    let game = load_game().await;
    if game.total_cards() == 0 {
        warning!("No cards yet. Create some with 'musicbingo cards generate'");
        return;
    }

    let rows: Vec<CardTableRow> = game.cards().iter().map(CardTableRow::from).collect();
    println!("{}", Table::new(rows));
}

pub async fn show_card(id: String) {
    let game = load_game().await;
    let library = match LibraryManager::load().await {
        Ok(l) => l,
        Err(e) => error!("Cannot load the song library. Err: {}", e),
    };

    let Some(card) = game.card(&id) else {
        error!("Card '{}' not found", id);
    };

    match CardView::new(card, |song_id| library.find_by_id(song_id)) {
        Ok(view) => println!("{}", TableRenderer { show_marks: true }.render(&view)),
        Err(e) => error!("Cannot render card '{}'. Err: {}", id, e),
    }
}

pub async fn check_card(id: String, mode: WinMode) {
    let game = load_game().await;
    match game.check_winner(&id, mode) {
        Ok(result) if result.is_winner => success!("{}: {}", id, result.message()),
        Ok(result) if !result.supported => warning!("{} ({})", result.message(), result.mode),
        Ok(result) => info!("{}: {} ({} to go)", id, result.message(), result.missing),
        Err(e) => error!("Cannot check card. Err: {}", e),
    }
}
