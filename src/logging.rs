// Conditional logging macros - only active in debug builds

use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_DIR: &str = "wordle-game";
const LOG_FILE: &str = "wordle-game.log";

/// `<local data dir>/wordle-game/wordle-game.log`, falling back to the temp dir.
#[must_use]
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_DIR)
        .join(LOG_FILE)
}

/// Sends `log` records to a file, since the TUI owns the terminal.
///
/// The level comes from `RUST_LOG` and defaults to `info`.
pub fn init_logger(path: Option<&Path>) -> io::Result<PathBuf> {
    let path = path.map_or_else(default_log_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    // A second init (e.g. in tests) keeps the first logger.
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_names_file() {
        assert!(default_log_path().ends_with("wordle-game/wordle-game.log"));
    }

    #[test]
    fn test_init_logger_creates_file() {
        let path = std::env::temp_dir()
            .join("wordle_game_logging_test")
            .join("test.log");
        let used = init_logger(Some(&path)).unwrap();
        assert_eq!(used, path);
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }
}
