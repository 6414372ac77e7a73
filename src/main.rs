use std::io;
use std::process::ExitCode;

use wordle_game::cli::{CliInterface, parse_cli};
use wordle_game::logging::init_logger;
use wordle_game::tui::TuiInterface;
use wordle_game::wordbank::{load_wordbank_from_file, resolve_wordbank};
use wordle_game::{DailyWordSource, DictionaryValidator, Game, game_loop};

fn main() -> ExitCode {
    let cli = parse_cli();

    let log_path = match init_logger(cli.log_file.as_deref()) {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("Logging disabled: {e}");
            None
        }
    };

    let answers = match resolve_wordbank(cli.wordbank_path.as_deref()) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Failed to load word list: {e}");
            return ExitCode::FAILURE;
        }
    };
    let dictionary = match &cli.dictionary_path {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load dictionary from '{}': {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => answers.clone(),
    };
    let validator = DictionaryValidator::new(dictionary);
    log::info!(
        "Loaded {} target words and {} dictionary words",
        answers.len(),
        validator.len()
    );

    let source = match cli.date {
        Some(date) => DailyWordSource::new(answers, date),
        None => DailyWordSource::for_today(answers),
    };
    log::info!("Daily word date: {}", source.date());
    let mut game = Game::new(source, validator);

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&mut game, &mut interface);
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut game, &mut interface);
    }

    if let Some(path) = log_path {
        log::info!("Session ended, log at {}", path.display());
    }
    ExitCode::SUCCESS
}
