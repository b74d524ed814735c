//! Music bingo engine and CLI library.
//!
//! Cards are grids of songs instead of numbers. This library generates
//! reproducible cards from a song library, runs a game session that draws
//! songs and plays short clips of them, and checks cards for a win.
//!
//! # Modules
//!
//! - `bingo` - card generation, win checks, the playback session and card rendering
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The error type shared by the engine and the managers
//! - `management` - File-backed song library and saved game
//! - `types` - Data structures and type definitions
//! - `utils` - Seeds, argument parsers and song title formatting
//!
//! # Example
//!
//! ```
//! use musicbingo::bingo::{CardOptions, generate_card};
//! use musicbingo::management::{LibraryManager, SongCatalog};
//!
//! #[tokio::main]
//! async fn main() -> musicbingo::Res<()> {
//!     let library = LibraryManager::load().await?;
//!     let card = generate_card(library.find_all(), &CardOptions::with_seed("party"))?;
//!     println!("{}", card.id());
//!     Ok(())
//! }
//! ```

pub mod bingo;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod types;
pub mod utils;

/// Catch-all result for CLI glue code.
///
/// Library operations return [`error::BingoError`]; it converts into this
/// boxed error with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Drawing from {} songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates with exit code 1 right after printing, so it is only used in
/// the command layer for failures the user has to fix first.
///
/// # Example
///
/// ```
/// error!("Cannot load the song library. Err: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems, such as a clip that could not be played.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
