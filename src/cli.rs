use crate::debug_log;
use crate::game_state::{GameInterface, UserAction};
use crate::scoring::{Feedback, KeyboardState, pattern_string};
use crate::session::{KeyInput, MAX_ATTEMPTS};
use chrono::NaiveDate;
use clap::Parser;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Guess the daily five-letter word in six tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of target words
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Path to a newline-delimited list of accepted guesses (defaults to the target list)
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary_path: Option<PathBuf>,

    /// Play the word of this day (YYYY-MM-DD) instead of today's
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Where to write the log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

enum LineInput {
    Guess(String),
    Erase(usize),
    NewGame,
    Exit,
    Empty,
    Invalid(char),
}

fn parse_line(line: &str) -> LineInput {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "" => LineInput::Empty,
        "exit" | "quit" => LineInput::Exit,
        "new" | "next" => LineInput::NewGame,
        _ if line.chars().all(|c| c == '-') => LineInput::Erase(line.len()),
        _ => match line.chars().find(|c| !c.is_ascii_alphabetic()) {
            Some(c) => LineInput::Invalid(c),
            None => LineInput::Guess(line),
        },
    }
}

/// Line-based implementation of [`GameInterface`].
///
/// Each line of letters replaces the current guess and submits it. A line of
/// `-` erases that many letters, `new` starts a new game and `exit` quits.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    pending: VecDeque<UserAction>,
    typed: usize,
    keyboard: KeyboardState,
    input_enabled: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
            typed: 0,
            keyboard: KeyboardState::new(),
            input_enabled: false,
        }
    }

    /// Consumes the interface, handing back the writer (useful to inspect
    /// captured output).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("CliInterface - write failed: {}", e);
        }
    }

    fn prompt(&mut self) {
        let text = if self.input_enabled {
            "\nEnter a 5-letter guess ('-' to erase, 'new' for a new game, 'exit' to quit):"
        } else {
            "\nType 'new' for a new game or 'exit' to quit:"
        };
        self.say(text);
    }

    fn queue_guess(&mut self, guess: &str) {
        for _ in 0..self.typed {
            self.pending.push_back(UserAction::Key(KeyInput::Backspace));
        }
        self.pending.extend(
            guess
                .chars()
                .map(|c| UserAction::Key(KeyInput::Letter(c))),
        );
        self.pending.push_back(UserAction::Submit);
    }

    fn keyboard_summary(&self) -> String {
        let group = |wanted: Feedback| -> String {
            self.keyboard
                .iter()
                .filter(|&(_, f)| f == wanted)
                .map(|(c, _)| c.to_ascii_uppercase())
                .collect()
        };
        format!(
            "Correct: {}  Present: {}  Absent: {}",
            group(Feedback::Correct),
            group(Feedback::Present),
            group(Feedback::Absent)
        )
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn next_action(&mut self) -> Option<UserAction> {
        loop {
            if let Some(action) = self.pending.pop_front() {
                return Some(action);
            }

            self.prompt();
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    debug_log!("CliInterface - read failed: {}", e);
                    return None;
                }
            }

            match parse_line(&line) {
                LineInput::Exit => return Some(UserAction::Exit),
                LineInput::NewGame => return Some(UserAction::NewGame),
                LineInput::Erase(n) => {
                    for _ in 0..n {
                        self.pending.push_back(UserAction::Key(KeyInput::Backspace));
                    }
                }
                LineInput::Guess(guess) => self.queue_guess(&guess),
                LineInput::Invalid(c) => {
                    self.say(&format!("Only letters are allowed! ('{c}' is not a letter)"));
                }
                LineInput::Empty => {}
            }
        }
    }

    fn render_guess(&mut self, _row: usize, guess: &str) {
        self.typed = guess.len();
    }

    fn render_feedback(&mut self, row: usize, guess: &str, labels: &[Feedback]) {
        self.typed = 0;
        let line = format!(
            "{}/{}  {}  {}",
            row + 1,
            MAX_ATTEMPTS,
            guess.to_uppercase(),
            pattern_string(labels)
        );
        self.say(&line);
    }

    fn render_keyboard(&mut self, updates: &[(char, Feedback)]) {
        for &(c, label) in updates {
            self.keyboard.record(&c.to_string(), &[label]);
        }
        let summary = self.keyboard_summary();
        self.say(&summary);
    }

    fn show_message(&mut self, message: &str) {
        if !message.is_empty() {
            self.say(message);
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn clear_board(&mut self) {
        self.typed = 0;
        self.pending.clear();
        self.keyboard.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn interface(input: &str) -> CliInterface<Cursor<&str>, Vec<u8>> {
        let mut ui = CliInterface::new(Cursor::new(input), Vec::new());
        ui.set_input_enabled(true);
        ui
    }

    fn output(ui: CliInterface<Cursor<&str>, Vec<u8>>) -> String {
        String::from_utf8(ui.into_writer()).unwrap()
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["wordle-game"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.dictionary_path, None);
        assert_eq!(cli.date, None);
        assert!(!cli.plain);
    }

    #[test]
    fn test_parse_cli_all_options() {
        let cli = Cli::try_parse_from([
            "wordle-game",
            "-i",
            "answers.txt",
            "--dictionary",
            "allowed.txt",
            "--date",
            "2024-03-01",
            "--plain",
            "--log-file",
            "game.log",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("answers.txt")));
        assert_eq!(cli.dictionary_path, Some(PathBuf::from("allowed.txt")));
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(cli.plain);
        assert_eq!(cli.log_file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_parse_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["wordle-game", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn test_guess_line_types_and_submits() {
        let mut ui = interface("Crane\n");
        let actions: Vec<_> = std::iter::from_fn(|| ui.next_action()).collect();
        let mut expected: Vec<_> = "crane"
            .chars()
            .map(|c| UserAction::Key(KeyInput::Letter(c)))
            .collect();
        expected.push(UserAction::Submit);
        assert_eq!(actions, expected);
    }

    #[test]
    fn test_guess_line_replaces_typed_letters() {
        let mut ui = interface("crane\n");
        ui.render_guess(0, "cra");
        assert_eq!(ui.next_action(), Some(UserAction::Key(KeyInput::Backspace)));
        assert_eq!(ui.next_action(), Some(UserAction::Key(KeyInput::Backspace)));
        assert_eq!(ui.next_action(), Some(UserAction::Key(KeyInput::Backspace)));
        assert_eq!(ui.next_action(), Some(UserAction::Key(KeyInput::Letter('c'))));
    }

    #[test]
    fn test_commands() {
        let mut ui = interface("\nnew\n--\nEXIT\n");
        assert_eq!(ui.next_action(), Some(UserAction::NewGame));
        assert_eq!(ui.next_action(), Some(UserAction::Key(KeyInput::Backspace)));
        assert_eq!(ui.next_action(), Some(UserAction::Key(KeyInput::Backspace)));
        assert_eq!(ui.next_action(), Some(UserAction::Exit));
        assert_eq!(ui.next_action(), None);
    }

    #[test]
    fn test_invalid_characters_reported() {
        let mut ui = interface("cr4ne\n");
        assert_eq!(ui.next_action(), None);
        assert!(output(ui).contains("'4' is not a letter"));
    }

    #[test]
    fn test_feedback_and_keyboard_output() {
        let mut ui = interface("");
        ui.render_feedback(0, "paper", &crate::scoring::score("paper", "apple"));
        ui.render_keyboard(&[
            ('p', Feedback::Correct),
            ('a', Feedback::Present),
            ('e', Feedback::Present),
            ('r', Feedback::Absent),
        ]);
        let text = output(ui);
        assert!(text.contains("1/6  PAPER  YYGYX"));
        assert!(text.contains("Correct: P  Present: AE  Absent: R"));
    }

    #[test]
    fn test_empty_message_not_printed() {
        let mut ui = interface("");
        ui.show_message("");
        ui.show_message("hello");
        assert_eq!(output(ui), "hello\n");
    }
}
