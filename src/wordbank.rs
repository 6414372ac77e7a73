use crate::session::WORD_LENGTH;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

const APP_DIR: &str = "wordle-game";
const WORDBANK_FILE: &str = "words.txt";

/// Normalizes a candidate word, returning it only if it is five ASCII letters.
#[must_use]
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word)
    } else {
        None
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_word).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// `<config dir>/wordle-game/words.txt`, if the platform has a config dir.
#[must_use]
pub fn default_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(WORDBANK_FILE))
}

/// Loads the word list from `path`, else the user's config file when present,
/// else the embedded list.
pub fn resolve_wordbank(path: Option<&Path>) -> io::Result<Vec<String>> {
    if let Some(path) = path {
        return load_wordbank_from_file(path);
    }
    if let Some(default) = default_wordbank_path()
        && default.is_file()
    {
        log::info!("Using word list from {}", default.display());
        return load_wordbank_from_file(default);
    }
    Ok(load_wordbank_from_str(EMBEDDED_WORDBANK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  Crane \n"), Some("crane".to_string()));
        assert_eq!(normalize_word("cranes"), None);
        assert_eq!(normalize_word("cr4ne"), None);
        assert_eq!(normalize_word(""), None);
    }

    #[test]
    fn test_load_wordbank_from_str_filters_and_lowercases() {
        let words = load_wordbank_from_str("APPLE\nbanana\nPeach\n\nab1de\n");
        assert_eq!(words, vec!["apple".to_string(), "peach".to_string()]);
    }

    #[test]
    fn test_embedded_wordbank_is_clean() {
        let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
        assert!(words.len() > 100);
        assert_eq!(words.len(), EMBEDDED_WORDBANK.lines().filter(|l| !l.trim().is_empty()).count());
    }

    #[test]
    fn test_load_wordbank_from_file() {
        let path = std::env::temp_dir().join("wordle_game_wordbank_unit.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "Lemon").unwrap();
            writeln!(file, "kiwi").unwrap();
            writeln!(file, "melon").unwrap();
        }
        let words = load_wordbank_from_file(&path).unwrap();
        assert_eq!(words, vec!["lemon".to_string(), "melon".to_string()]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_wordbank_missing_file_errors() {
        let path = std::env::temp_dir().join("wordle_game_does_not_exist.txt");
        assert!(resolve_wordbank(Some(&path)).is_err());
    }

    #[test]
    fn test_default_path_ends_with_words_file() {
        if let Some(path) = default_wordbank_path() {
            assert!(path.ends_with("wordle-game/words.txt"));
        }
    }
}
