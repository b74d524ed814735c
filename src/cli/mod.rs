//! # CLI Module
//!
//! Command implementations behind `main.rs`. Each command loads what it needs
//! from the data directory, reports through the console macros and saves
//! its changes before returning. Unrecoverable problems end the process via
//! [`error!`](crate::error!).
//!
//! ## Typical evening
//!
//! ```bash
//! musicbingo library import songs.json
//! musicbingo game new
//! musicbingo cards generate --count 30 --seed friday --html cards.html
//! musicbingo play
//! musicbingo cards check CARD-1697500000000-k3j9x0a1b
//! ```

mod cards;
mod game;
mod library;
mod play;

pub use cards::GenerateOptions;
pub use cards::check_card;
pub use cards::generate as generate_cards;
pub use cards::list_cards;
pub use cards::show_card;
pub use game::export_game;
pub use game::finish_game;
pub use game::import_game;
pub use game::new_game;
pub use game::status as game_status;
pub use library::import_songs;
pub use library::list_songs;
pub use library::remove_song;
pub use play::play;
