//! The game engine.
//!
//! - [`generator`] builds cards from a song pool, reproducibly per seed.
//! - [`card`] holds the card data and its marks.
//! - [`win`] checks cards against called songs.
//! - [`session`] runs a live game: random draws and clip playback through an
//!   [`AudioPort`].
//! - [`render`] turns cards into terminal tables or printable HTML.

pub mod audio;
pub mod card;
pub mod events;
pub mod generator;
pub mod render;
pub mod rng;
pub mod session;
pub mod win;

pub use audio::{AudioPort, CatalogAudioPort, ResolvedAudio};
pub use card::BingoCard;
pub use events::{EventKind, SessionEvent, SubscriptionId};
pub use generator::{CardOptions, generate_card, generate_cards};
pub use render::{CardRenderer, CardView, CellLabel, HtmlRenderer, TableRenderer};
pub use rng::{SeededRng, seeded_random};
pub use session::{PlaybackSession, SessionConfig, SessionSnapshot};
pub use win::{WinResult, check_win, mark_drawn};
