//! Word services the game depends on: where target words come from and how
//! guesses are checked for legality.

use crate::error::{ValidationError, WordSourceError};
use crate::info_log;
use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashSet;

/// Supplies target words. Each call answers one "give me a five-letter word"
/// request; the game uses the first entry.
pub trait WordSource {
    fn fetch_words(&mut self) -> Result<Vec<String>, WordSourceError>;
}

/// Answers "is this a legitimate dictionary entry".
pub trait WordValidator {
    fn validate(&mut self, word: &str) -> Result<bool, ValidationError>;
}

/// Deterministic daily word picker over a fixed word list.
///
/// The first word served is the word for `date`; every further request (a
/// new game) moves one step along the list.
#[derive(Debug, Clone)]
pub struct DailyWordSource {
    words: Vec<String>,
    date: NaiveDate,
    served: usize,
}

impl DailyWordSource {
    #[must_use]
    pub fn new(words: Vec<String>, date: NaiveDate) -> Self {
        Self {
            words,
            date,
            served: 0,
        }
    }

    #[must_use]
    pub fn for_today(words: Vec<String>) -> Self {
        Self::new(words, Local::now().date_naive())
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    fn index(&self) -> usize {
        let day = usize::try_from(self.date.num_days_from_ce()).unwrap_or(0);
        day.wrapping_add(self.served) % self.words.len()
    }
}

impl WordSource for DailyWordSource {
    fn fetch_words(&mut self) -> Result<Vec<String>, WordSourceError> {
        if self.words.is_empty() {
            return Err(WordSourceError::EmptyWordList);
        }
        let word = self.words[self.index()].clone();
        self.served += 1;
        info_log!("DailyWordSource - served word #{} for {}", self.served, self.date);
        Ok(vec![word])
    }
}

/// Accepts exactly the words in its dictionary, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct DictionaryValidator {
    words: HashSet<String>,
}

impl DictionaryValidator {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordValidator for DictionaryValidator {
    fn validate(&mut self, word: &str) -> Result<bool, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::Unavailable("dictionary is empty".to_string()));
        }
        Ok(self.words.contains(&word.to_lowercase()))
    }
}
