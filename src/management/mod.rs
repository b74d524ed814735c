mod game;
mod library;

pub use game::GameManager;
pub use library::LibraryManager;
pub use library::SongCatalog;
