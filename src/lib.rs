// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod scoring;
pub mod session;
pub mod tui;
pub mod wordbank;
pub mod words;

// Re-export commonly used items for easier testing
pub use error::{GameError, ValidationError, WordSourceError};
pub use game_state::{Game, GameInterface, UserAction, game_loop};
pub use scoring::{Feedback, KeyboardState, score};
pub use session::{GameSession, GameStatus, KeyInput, MAX_ATTEMPTS, WORD_LENGTH};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
pub use words::{DailyWordSource, DictionaryValidator, WordSource, WordValidator};
