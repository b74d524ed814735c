use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use musicbingo::{cli, config, error, types, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage the song library
    Library(LibraryOptions),

    /// Generate, list and check bingo cards
    Cards(CardsOptions),

    /// Run an interactive game session
    Play(PlayOptions),

    /// Start, finish, export or import the saved game
    Game(GameOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Manage the song library",
    args_conflicts_with_subcommands = true // disallow mixing --search with subcommands
)]
pub struct LibraryOptions {
    /// Only list songs whose title, artist or album contains this text
    #[clap(long)]
    pub search: Option<String>,

    #[command(subcommand)]
    pub command: Option<LibrarySubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LibrarySubcommand {
    /// List songs
    List(LibraryListOpts),

    /// Add songs from a JSON file
    Import { file: PathBuf },

    /// Remove a song by id
    Remove { id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryListOpts {
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CardsOptions {
    #[command(subcommand)]
    pub command: CardsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CardsSubcommand {
    /// Generate cards from the playable songs of the library
    Generate(CardsGenerateOpts),

    /// List the cards of the saved game
    List,

    /// Print one card
    Show { id: String },

    /// Check a card against the songs called so far
    Check(CardsCheckOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct CardsGenerateOpts {
    /// Number of cards
    #[clap(long, default_value_t = 1)]
    pub count: usize,

    /// Seed of a single card, or the base seed of a batch
    #[clap(long)]
    pub seed: Option<String>,

    /// Card layout (3x5 or 5x5); defaults to MUSICBINGO_LAYOUT
    #[clap(long, value_parser = utils::parse_layout)]
    pub layout: Option<types::Layout>,

    /// Avoid the same artist twice in one row
    #[clap(long)]
    pub prevent_duplicate_artist: bool,

    /// Also write the cards as a printable HTML page
    #[clap(long)]
    pub html: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CardsCheckOpts {
    pub id: String,

    #[clap(long, default_value = "full_card", value_parser = utils::parse_win_mode)]
    pub mode: types::WinMode,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Draw without playing the clip right away
    #[clap(long)]
    pub no_auto_play: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Start, finish, export or import the saved game")]
pub struct GameOptions {
    /// Without a subcommand the game status and call history are shown
    #[command(subcommand)]
    pub command: Option<GameSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum GameSubcommand {
    /// Start a new game, dropping cards and calls
    New,

    /// Mark the game as finished
    Finish,

    /// Write the whole game to a JSON file
    Export { file: PathBuf },

    /// Replace the game with an exported one
    Import { file: PathBuf },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Library(opt) => match opt.command {
            Some(LibrarySubcommand::List(l)) => cli::list_songs(l.search.or(opt.search)).await,
            Some(LibrarySubcommand::Import { file }) => cli::import_songs(file).await,
            Some(LibrarySubcommand::Remove { id }) => cli::remove_song(id).await,
            None => cli::list_songs(opt.search).await,
        },

        Command::Cards(opt) => match opt.command {
            CardsSubcommand::Generate(g) => {
                cli::generate_cards(cli::GenerateOptions {
                    count: g.count,
                    seed: g.seed,
                    layout: g.layout.unwrap_or_else(config::default_layout),
                    prevent_duplicate_artist: g.prevent_duplicate_artist,
                    html: g.html,
                })
                .await
            }
            CardsSubcommand::List => cli::list_cards().await,
            CardsSubcommand::Show { id } => cli::show_card(id).await,
            CardsSubcommand::Check(c) => cli::check_card(c.id, c.mode).await,
        },

        Command::Play(opt) => cli::play(config::auto_play() && !opt.no_auto_play).await,

        Command::Game(opt) => match opt.command {
            Some(GameSubcommand::New) => cli::new_game().await,
            Some(GameSubcommand::Finish) => cli::finish_game().await,
            Some(GameSubcommand::Export { file }) => cli::export_game(file).await,
            Some(GameSubcommand::Import { file }) => cli::import_game(file).await,
            None => cli::game_status().await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
