use std::{
    collections::HashSet,
    io::{self, Write},
    sync::Arc,
};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::{
    bingo::{CatalogAudioPort, PlaybackSession, SessionConfig, SessionEvent},
    error, info,
    management::{GameManager, LibraryManager, SongCatalog},
    success,
    types::{Song, WinMode},
    warning,
};

/// What the printer task writes, in arrival order.
enum Notice {
    Event(SessionEvent),
    Winner(String),
}

const HELP: &str = "commands: next (n), play (p), pause, resume (r), stop (s), again (a), auto, state, help, quit (q)";

/// Runs an interactive session over the playable songs of the library.
///
/// Every draw is recorded in the saved game and new full-card winners are
/// announced right away.
pub async fn play(auto_play: bool) {
    let library = match LibraryManager::load().await {
        Ok(l) => l,
        Err(e) => error!("Cannot load the song library. Err: {}", e),
    };
    let mut game = match GameManager::load().await {
        Ok(g) => g,
        Err(e) => error!("Cannot load the saved game. Err: {}", e),
    };
    if !game.is_active() {
        error!("No game is running. Start one with 'musicbingo game new'");
    }

    let config = SessionConfig {
        auto_play,
        ..SessionConfig::from_env()
    };
    let session = PlaybackSession::new(Arc::new(CatalogAudioPort::new()), config);

    let (tx, mut rx) = mpsc::unbounded_channel::<Notice>();
    let events = tx.clone();
    session.subscribe_all(move |event| {
        let _ = events.send(Notice::Event(event.clone()));
    });
    let printer = tokio::spawn(async move {
        while let Some(notice) = rx.recv().await {
            match notice {
                Notice::Event(event) => describe(&event),
                Notice::Winner(card) => success!("BINGO! {} is complete", card),
            }
        }
    });

    // songs called in an earlier run of this game are not drawn again
    let called: HashSet<&str> = game.called_ids().into_iter().collect();
    let pool: Vec<Song> = library
        .playable()
        .into_iter()
        .filter(|s| !called.contains(s.id.as_str()))
        .collect();
    session.load_songs(pool);

    let mut announced: HashSet<String> = game
        .winners(WinMode::FullCard)
        .iter()
        .map(|c| c.id().to_string())
        .collect();

    info!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input. Err: {}", e);
                break;
            }
        };

        match line.trim().to_ascii_lowercase().as_str() {
            "" => continue,
            "next" | "n" => {
                let Some(song) = session.draw_next_song().await else {
                    continue;
                };
                game.record_call(&song);
                if let Err(e) = game.persist().await {
                    warning!("Cannot save the game. Err: {}", e);
                }
                for card in game.winners(WinMode::FullCard) {
                    if announced.insert(card.id().to_string()) {
                        let _ = tx.send(Notice::Winner(card.id().to_string()));
                    }
                }
            }
            "play" | "p" => {
                if let Err(e) = session.play_current_song().await {
                    warning!("{}", e);
                }
            }
            "again" | "a" => {
                if let Err(e) = session.replay_current_song().await {
                    warning!("{}", e);
                }
            }
            "pause" => session.pause_playback(),
            "resume" | "r" => session.resume_playback(),
            "stop" | "s" => session.stop_playback(),
            "auto" => session.set_auto_play(!session.state().auto_play_enabled),
            "state" => {
                let state = session.state();
                info!(
                    "{} drawn, {} left, playback {}, auto-play {}",
                    state.drawn_songs,
                    state.remaining_songs,
                    state.playback_state,
                    if state.auto_play_enabled { "on" } else { "off" }
                );
                if let Some(song) = state.current_song {
                    info!("Current: {} - {}", song.artist, song.title);
                }
            }
            "help" | "h" | "?" => info!("{}", HELP),
            "quit" | "q" | "exit" => break,
            other => warning!("Unknown command '{}'. {}", other, HELP),
        }
    }

    session.stop_playback();
    // the channel closes once both senders are gone
    drop(session);
    drop(tx);
    let _ = printer.await;

    if let Err(e) = game.persist().await {
        error!("Cannot save the game. Err: {}", e);
    }
    success!(
        "{} songs called, {} winning cards so far",
        game.total_calls(),
        announced.len()
    );
}

fn describe(event: &SessionEvent) {
    match event {
        SessionEvent::SongsLoaded { count } => info!("{} songs ready to draw", count),
        SessionEvent::SongDrawn {
            song,
            remaining,
            drawn,
        } => info!(
            "#{} {} - {} ({} left)",
            drawn, song.artist, song.title, remaining
        ),
        SessionEvent::PlaybackStarted(song) => info!("Loading '{}'...", song.title),
        SessionEvent::PlaybackEnded(song) => info!("Clip of '{}' finished", song.title),
        SessionEvent::PlaybackPaused => info!("Paused"),
        SessionEvent::PlaybackResumed => info!("Resumed"),
        SessionEvent::PlaybackStopped => info!("Stopped"),
        SessionEvent::BingoFinished => success!("Every song has been drawn"),
        SessionEvent::AutoPlayChanged(on) => info!("Auto-play {}", if *on { "on" } else { "off" }),
        // the session already warns about failed clips
        SessionEvent::PlaybackError { .. } | SessionEvent::Reset => {}
    }
}
