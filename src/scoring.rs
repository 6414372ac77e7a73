//! Guess scoring and keyboard aggregation.

/// Per-letter outcome of a scored guess.
///
/// Variants are ordered by strength so the best label for a letter can be
/// picked with `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feedback {
    Absent,
    Present,
    Correct,
}

impl Feedback {
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Scores `guess` against `target`.
///
/// Exact matches are labelled first and consume their target letter, then the
/// remaining guess letters are matched against whatever target letters are
/// left. A target letter is credited at most once. The result always has one
/// label per guess letter.
#[must_use]
pub fn score(guess: &str, target: &str) -> Vec<Feedback> {
    let guess_chars: Vec<char> = guess.chars().collect();
    let mut target_chars: Vec<Option<char>> = target.chars().map(Some).collect();
    let mut labels = vec![None; guess_chars.len()];

    // First pass: exact positions
    for (i, &g) in guess_chars.iter().enumerate() {
        if let Some(slot) = target_chars.get_mut(i)
            && *slot == Some(g)
        {
            labels[i] = Some(Feedback::Correct);
            *slot = None;
        }
    }

    // Second pass: letters elsewhere in the target
    for (i, &g) in guess_chars.iter().enumerate() {
        if labels[i].is_some() {
            continue;
        }
        labels[i] = match target_chars.iter().position(|&c| c == Some(g)) {
            Some(pos) => {
                target_chars[pos] = None;
                Some(Feedback::Present)
            }
            None => Some(Feedback::Absent),
        };
    }

    labels
        .into_iter()
        .map(|label| label.unwrap_or(Feedback::Absent))
        .collect()
}

/// Renders labels as a `G`/`Y`/`X` pattern string.
#[must_use]
pub fn pattern_string(labels: &[Feedback]) -> String {
    labels.iter().map(|f| f.symbol()).collect()
}

/// Best label seen for every letter over the course of one game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardState {
    letters: [Option<Feedback>; 26],
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a scored guess into the keyboard.
    ///
    /// Returns the letters whose label improved, in guess order. A letter is
    /// never downgraded, so an `Absent` for a duplicate letter cannot hide an
    /// earlier `Correct`.
    pub fn record(&mut self, guess: &str, labels: &[Feedback]) -> Vec<(char, Feedback)> {
        let mut changed: Vec<(char, Feedback)> = Vec::new();
        for (c, &label) in guess.chars().zip(labels) {
            let Some(idx) = letter_index(c) else {
                continue;
            };
            let slot = &mut self.letters[idx];
            if slot.is_none_or(|current| label > current) {
                *slot = Some(label);
                let c = c.to_ascii_lowercase();
                match changed.iter_mut().find(|(letter, _)| *letter == c) {
                    Some(entry) => entry.1 = label,
                    None => changed.push((c, label)),
                }
            }
        }
        changed
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<Feedback> {
        letter_index(letter).and_then(|idx| self.letters[idx])
    }

    pub fn clear(&mut self) {
        self.letters = [None; 26];
    }

    /// Letters with a label, alphabetically.
    pub fn iter(&self) -> impl Iterator<Item = (char, Feedback)> + '_ {
        self.letters
            .iter()
            .enumerate()
            .filter_map(|(i, label)| label.map(|l| ((b'a' + i as u8) as char, l)))
    }
}

fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_lowercase() as u8 - b'a') as usize)
    } else {
        None
    }
}
