use std::path::PathBuf;

use tabled::{Table, Tabled};

use crate::{error, info, management::GameManager, success, warning};

#[derive(Tabled)]
struct CallTableRow {
    order: usize,
    title: String,
    artist: String,
    called: String,
}

async fn load_game() -> GameManager {
    match GameManager::load().await {
        Ok(g) => g,
        Err(e) => error!("Cannot load the saved game. Err: {}", e),
    }
}

async fn save_game(game: &GameManager) {
    if let Err(e) = game.persist().await {
        error!("Cannot save the game. Err: {}", e);
    }
}

pub async fn status() {
    let game = load_game().await;
    info!(
        "Game is {}: {} cards, {} songs called",
        if game.is_active() { "running" } else { "not running" },
        game.total_cards(),
        game.total_calls()
    );

    if game.total_calls() == 0 {
        return;
    }

    let rows: Vec<CallTableRow> = game
        .history()
        .iter()
        .map(|c| CallTableRow {
            order: c.order,
            title: c.title.clone(),
            artist: c.artist.clone(),
            called: c.called_at.format("%H:%M:%S").to_string(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn new_game() {
    let mut game = load_game().await;
    if game.is_active() && game.total_calls() > 0 {
        warning!(
            "Discarding the running game ({} cards, {} calls)",
            game.total_cards(),
            game.total_calls()
        );
    }
    game.start_new_game();
    save_game(&game).await;
    success!("New game started. Generate cards with 'musicbingo cards generate'");
}

pub async fn finish_game() {
    let mut game = load_game().await;
    if !game.is_active() {
        warning!("No game is running");
        return;
    }
    game.finish_game();
    save_game(&game).await;
    success!("Game finished after {} calls", game.total_calls());
}

pub async fn export_game(file: PathBuf) {
    let game = load_game().await;
    let json = match game.export_json() {
        Ok(j) => j,
        Err(e) => error!("Cannot export the game. Err: {}", e),
    };
    if let Err(e) = async_fs::write(&file, json).await {
        error!("Cannot write {}. Err: {}", file.display(), e);
    }
    success!("Game exported to {}", file.display());
}

pub async fn import_game(file: PathBuf) {
    let json = match async_fs::read_to_string(&file).await {
        Ok(j) => j,
        Err(e) => error!("Cannot read {}. Err: {}", file.display(), e),
    };

    let mut game = load_game().await;
    if let Err(e) = game.import_json(&json) {
        error!("Cannot import {}. Err: {}", file.display(), e);
    }
    save_game(&game).await;
    success!(
        "Imported game with {} cards and {} calls",
        game.total_cards(),
        game.total_calls()
    );
}
