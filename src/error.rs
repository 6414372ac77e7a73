use thiserror::Error;

/// Failures reported by a [`WordSource`](crate::words::WordSource).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WordSourceError {
    #[error("the word list is empty")]
    EmptyWordList,

    #[error("the word source returned no words")]
    NoWords,

    #[error("\"{0}\" is not a five-letter word")]
    MalformedWord(String),

    #[error("word source unavailable: {0}")]
    Unavailable(String),
}

/// Failures reported by a [`WordValidator`](crate::words::WordValidator).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("dictionary unavailable: {0}")]
    Unavailable(String),
}

/// Every way a game action can be refused.
///
/// The `Display` text is what the player sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Failed to fetch daily word. Please try again later.")]
    WordFetchFailure(#[source] WordSourceError),

    #[error("Could not check \"{word}\" against the dictionary. Please try again.")]
    ValidationServiceFailure {
        word: String,
        #[source]
        source: ValidationError,
    },

    #[error("\"{0}\" is not in the word list.")]
    NotInWordList(String),

    #[error("Please enter a 5-letter word.")]
    InvalidGuessLength(usize),

    #[error("You've used all your attempts!")]
    AttemptsExhausted,

    #[error("Still checking your last guess.")]
    SubmissionInFlight,

    #[error("No guess is waiting for a dictionary answer.")]
    NoSubmissionPending,

    #[error("The game is over. Start a new game to keep playing.")]
    GameOver,

    #[error("Finish the current game before starting a new one.")]
    GameInProgress,

    #[error("No word loaded yet. Start a new game to try again.")]
    NoTargetWord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages_are_player_facing() {
        assert_eq!(
            GameError::InvalidGuessLength(4).to_string(),
            "Please enter a 5-letter word."
        );
        assert_eq!(
            GameError::NotInWordList("xyzzy".to_string()).to_string(),
            "\"xyzzy\" is not in the word list."
        );
    }

    #[test]
    fn test_fetch_failure_keeps_cause() {
        let err = GameError::WordFetchFailure(WordSourceError::EmptyWordList);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("the word list is empty"));
    }
}
