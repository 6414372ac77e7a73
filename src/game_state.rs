use crate::error::{GameError, WordSourceError};
use crate::scoring::Feedback;
use crate::session::{GameSession, KeyInput, TurnOutcome};
use crate::wordbank::normalize_word;
use crate::words::{WordSource, WordValidator};
use crate::{debug_log, info_log};

/// Something the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Key(KeyInput),
    Submit,
    NewGame,
    Exit,
}

/// Trait abstracting the player-facing side of the game.
///
/// The controller only ever calls these with structured data; how a row or
/// a key gets drawn is up to the implementation.
pub trait GameInterface {
    /// Blocks until the player does something. `None` means the input has
    /// ended.
    fn next_action(&mut self) -> Option<UserAction>;

    /// Shows the guess being typed on `row`, blank cells past its end.
    fn render_guess(&mut self, row: usize, guess: &str);

    fn render_feedback(&mut self, row: usize, guess: &str, labels: &[Feedback]);

    /// Letters whose keyboard colour should change.
    fn render_keyboard(&mut self, updates: &[(char, Feedback)]);

    fn show_message(&mut self, message: &str);

    fn set_input_enabled(&mut self, enabled: bool);

    /// Wipes grid, keyboard colours and message for a new game.
    fn clear_board(&mut self);
}

/// Owns the session and the word services, and routes player actions
/// through them to a [`GameInterface`].
pub struct Game<S, V> {
    session: GameSession,
    source: S,
    validator: V,
}

impl<S: WordSource, V: WordValidator> Game<S, V> {
    pub fn new(source: S, validator: V) -> Self {
        Self {
            session: GameSession::new(),
            source,
            validator,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Fetches the first target word.
    pub fn load<I: GameInterface + ?Sized>(&mut self, ui: &mut I) -> Result<(), GameError> {
        self.start_new_game(ui)
    }

    pub fn on_key<I: GameInterface + ?Sized>(&mut self, key: KeyInput, ui: &mut I) {
        if self.session.press_key(key) {
            ui.render_guess(self.session.row(), self.session.current_guess());
        }
    }

    /// Validates and scores the current guess. On refusal the reason is shown
    /// and returned; the session is unchanged.
    pub fn on_submit<I: GameInterface + ?Sized>(
        &mut self,
        ui: &mut I,
    ) -> Result<TurnOutcome, GameError> {
        let word = match self.session.begin_submission() {
            Ok(word) => word,
            Err(e) => return Err(Self::refuse(e, ui)),
        };

        let verdict = self.validator.validate(&word);
        debug_log!("on_submit() - Validator answered {:?} for '{}'", verdict, word);
        let outcome = match self.session.complete_submission(verdict) {
            Ok(outcome) => outcome,
            Err(e) => return Err(Self::refuse(e, ui)),
        };

        ui.render_feedback(outcome.row, &outcome.guess.word, &outcome.guess.labels);
        if !outcome.keyboard_updates.is_empty() {
            ui.render_keyboard(&outcome.keyboard_updates);
        }
        if let Some(message) = self.session.end_message() {
            info_log!("on_submit() - Game over: {:?}", outcome.status);
            ui.show_message(&message);
            ui.set_input_enabled(false);
        } else {
            ui.show_message("");
        }
        Ok(outcome)
    }

    /// Starts a new game once the current one is over.
    pub fn on_reset<I: GameInterface + ?Sized>(&mut self, ui: &mut I) -> Result<(), GameError> {
        if !self.session.can_reset() {
            return Err(Self::refuse(GameError::GameInProgress, ui));
        }
        self.start_new_game(ui)
    }

    /// Routes one action. Returns `false` when the player asked to exit.
    pub fn handle<I: GameInterface + ?Sized>(&mut self, action: UserAction, ui: &mut I) -> bool {
        match action {
            UserAction::Key(key) => self.on_key(key, ui),
            UserAction::Submit => {
                let _ = self.on_submit(ui);
            }
            UserAction::NewGame => {
                let _ = self.on_reset(ui);
            }
            UserAction::Exit => return false,
        }
        true
    }

    fn start_new_game<I: GameInterface + ?Sized>(&mut self, ui: &mut I) -> Result<(), GameError> {
        ui.clear_board();
        match self.fetch_target() {
            Ok(target) => {
                self.session.restart(&target);
                ui.set_input_enabled(true);
                ui.show_message("Guess the five-letter word.");
                Ok(())
            }
            Err(e) => {
                log::error!("Could not fetch a target word: {e:?}");
                self.session.clear_target();
                ui.set_input_enabled(false);
                ui.show_message(&e.to_string());
                Err(e)
            }
        }
    }

    fn fetch_target(&mut self) -> Result<String, GameError> {
        let words = self
            .source
            .fetch_words()
            .map_err(GameError::WordFetchFailure)?;
        let first = words
            .into_iter()
            .next()
            .ok_or(GameError::WordFetchFailure(WordSourceError::NoWords))?;
        normalize_word(&first)
            .ok_or_else(|| GameError::WordFetchFailure(WordSourceError::MalformedWord(first)))
    }

    fn refuse<I: GameInterface + ?Sized>(error: GameError, ui: &mut I) -> GameError {
        info_log!("Action refused: {:?}", error);
        ui.show_message(&error.to_string());
        error
    }
}

/// Loads the first word and feeds player actions to the game until the
/// player exits or input runs out.
pub fn game_loop<S, V, I>(game: &mut Game<S, V>, interface: &mut I)
where
    S: WordSource,
    V: WordValidator,
    I: GameInterface + ?Sized,
{
    // A failed fetch leaves the game waiting for a reset
    let _ = game.load(interface);

    while let Some(action) = interface.next_action() {
        debug_log!("game_loop() - Action: {:?}", action);
        if !game.handle(action, interface) {
            info_log!("game_loop() - Exit requested");
            break;
        }
    }
}
