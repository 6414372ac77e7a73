//! The game session state machine.
//!
//! A [`GameSession`] holds everything one game needs and only changes through
//! its transition methods, so it can be driven without any rendering surface.
//!
//! # State Machine
//! - `Active` → `Won` when a submitted guess equals the target
//! - `Active` → `Lost` when the last attempt is used without a win
//! - `Won` / `Lost` → `Active` through [`GameSession::restart`]
//!
//! Submitting is split in two so the dictionary lookup can happen outside the
//! session: [`GameSession::begin_submission`] locks the buffer and
//! [`GameSession::complete_submission`] applies the verdict.

use crate::error::{GameError, ValidationError};
use crate::scoring::{Feedback, KeyboardState, score};
use crate::{debug_log, info_log};

pub const WORD_LENGTH: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A key the player can press while typing a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Letter(char),
    Backspace,
}

/// A guess that has been scored and placed on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredGuess {
    pub word: String,
    pub labels: Vec<Feedback>,
}

/// Everything an accepted guess changed, for the interface to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub row: usize,
    pub guess: ScoredGuess,
    /// Letters whose keyboard label improved with this guess.
    pub keyboard_updates: Vec<(char, Feedback)>,
    pub status: GameStatus,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    target: Option<String>,
    guess: String,
    attempts: usize,
    row: usize,
    status: GameStatus,
    board: Vec<ScoredGuess>,
    keyboard: KeyboardState,
    submission_pending: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// A session with no target word yet. It ignores input until
    /// [`restart`](Self::restart) gives it one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: None,
            guess: String::new(),
            attempts: 0,
            row: 0,
            status: GameStatus::Active,
            board: Vec::new(),
            keyboard: KeyboardState::new(),
            submission_pending: false,
        }
    }

    #[must_use]
    pub fn with_target(target: &str) -> Self {
        let mut session = Self::new();
        session.restart(target);
        session
    }

    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    #[must_use]
    pub fn current_guess(&self) -> &str {
        &self.guess
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn board(&self) -> &[ScoredGuess] {
        &self.board
    }

    #[must_use]
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    #[must_use]
    pub fn submission_pending(&self) -> bool {
        self.submission_pending
    }

    /// Whether key input is currently accepted.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.target.is_some() && self.status == GameStatus::Active && !self.submission_pending
    }

    /// A new game may start once this one is over, or when there is no
    /// target to play against.
    #[must_use]
    pub fn can_reset(&self) -> bool {
        !self.submission_pending && (self.target.is_none() || self.status.is_terminal())
    }

    /// Applies a key press to the guess buffer. Returns whether the buffer
    /// changed.
    pub fn press_key(&mut self, key: KeyInput) -> bool {
        if !self.accepts_input() {
            debug_log!("press_key() - Ignoring {:?}, input disabled", key);
            return false;
        }
        match key {
            KeyInput::Letter(c) if c.is_ascii_alphabetic() && self.guess.len() < WORD_LENGTH => {
                self.guess.push(c.to_ascii_lowercase());
                debug_log!("press_key() - Buffer now '{}'", self.guess);
                true
            }
            KeyInput::Backspace => {
                let removed = self.guess.pop().is_some();
                debug_log!("press_key() - Buffer now '{}'", self.guess);
                removed
            }
            KeyInput::Letter(_) => false,
        }
    }

    /// Checks the local guards and locks the buffer for validation.
    ///
    /// Returns the word that must be validated. On error nothing changes.
    pub fn begin_submission(&mut self) -> Result<String, GameError> {
        if self.target.is_none() {
            return Err(GameError::NoTargetWord);
        }
        if self.submission_pending {
            return Err(GameError::SubmissionInFlight);
        }
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.guess.len() != WORD_LENGTH {
            return Err(GameError::InvalidGuessLength(self.guess.len()));
        }
        if self.attempts >= MAX_ATTEMPTS {
            return Err(GameError::AttemptsExhausted);
        }
        self.submission_pending = true;
        info_log!("begin_submission() - Validating '{}'", self.guess);
        Ok(self.guess.clone())
    }

    /// Applies the dictionary verdict for the word locked by
    /// [`begin_submission`](Self::begin_submission).
    ///
    /// A rejected word or a failed lookup unlocks the buffer and consumes no
    /// attempt.
    pub fn complete_submission(
        &mut self,
        verdict: Result<bool, ValidationError>,
    ) -> Result<TurnOutcome, GameError> {
        if !self.submission_pending {
            return Err(GameError::NoSubmissionPending);
        }
        self.submission_pending = false;

        match verdict {
            Ok(true) => {}
            Ok(false) => return Err(GameError::NotInWordList(self.guess.clone())),
            Err(source) => {
                log::warn!("Validation failed for '{}': {}", self.guess, source);
                return Err(GameError::ValidationServiceFailure {
                    word: self.guess.clone(),
                    source,
                });
            }
        }

        let target = self.target.as_deref().ok_or(GameError::NoTargetWord)?;
        let word = std::mem::take(&mut self.guess);
        let labels = score(&word, target);
        let won = word == target;
        let keyboard_updates = self.keyboard.record(&word, &labels);
        let row = self.row;
        let guess = ScoredGuess { word, labels };
        self.board.push(guess.clone());

        self.attempts += 1;
        self.row += 1;
        self.status = if won {
            GameStatus::Won
        } else if self.attempts >= MAX_ATTEMPTS {
            GameStatus::Lost
        } else {
            GameStatus::Active
        };
        info_log!(
            "complete_submission() - Row {} scored, attempts {}, status {:?}",
            row,
            self.attempts,
            self.status
        );

        Ok(TurnOutcome {
            row,
            guess,
            keyboard_updates,
            status: self.status,
        })
    }

    /// Runs a whole submission with a verdict that is already known.
    pub fn submit(
        &mut self,
        verdict: impl FnOnce(&str) -> Result<bool, ValidationError>,
    ) -> Result<TurnOutcome, GameError> {
        let word = self.begin_submission()?;
        self.complete_submission(verdict(&word))
    }

    /// Starts a fresh game against `target`, clearing all progress.
    pub fn restart(&mut self, target: &str) {
        *self = Self {
            target: Some(target.to_lowercase()),
            ..Self::new()
        };
        info_log!("restart() - New game started");
    }

    /// Drops the target after a failed fetch, leaving the session unusable
    /// until the next successful restart.
    pub fn clear_target(&mut self) {
        *self = Self::new();
    }

    /// Text shown once the game has ended.
    #[must_use]
    pub fn end_message(&self) -> Option<String> {
        match self.status {
            GameStatus::Won => Some("Congratulations! You've guessed the word!".to_string()),
            GameStatus::Lost => Some(format!(
                "Sorry, you've used all your guesses. The word was: {}",
                self.target.as_deref().unwrap_or_default()
            )),
            GameStatus::Active => None,
        }
    }
}
