//! Word-ladder puzzle: turn one word into another by changing a single
//! letter per move, passing only through words in the vocabulary.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::difficulty::{classify, Difficulty};
use crate::error::{InputError, SearchError};
use crate::puzzle::Puzzle;
use crate::solver::SolverConfig;

/// Read a whitespace-separated word list, lowercasing every entry.
pub fn load_words(path: impl AsRef<Path>) -> Result<BTreeSet<String>, InputError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(content.split_whitespace().map(str::to_lowercase).collect())
}

/// Whether two words have equal length and differ in exactly one position
fn one_letter_apart(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).filter(|(x, y)| x != y).take(2).count() == 1
}

/// A word ladder state. The vocabulary is shared by every state of one puzzle.
#[derive(Debug, Clone)]
pub struct WordLadder {
    from: String,
    to: String,
    words: Arc<BTreeSet<String>>,
}

impl WordLadder {
    pub fn new<I, S>(from: impl Into<String>, to: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words.into_iter().map(Into::into).collect();
        Self::with_vocabulary(from, to, Arc::new(words))
    }

    pub fn with_vocabulary(
        from: impl Into<String>,
        to: impl Into<String>,
        words: Arc<BTreeSet<String>>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            words,
        }
    }

    pub fn from_word(&self) -> &str {
        &self.from
    }

    pub fn to_word(&self) -> &str {
        &self.to
    }

    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.words
    }

    /// Classify by the length of the shortest ladder.
    pub fn difficulty(&self, config: &SolverConfig) -> Result<Difficulty, SearchError> {
        classify(self.clone(), config)
    }
}

impl PartialEq for WordLadder {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && (Arc::ptr_eq(&self.words, &other.words) || self.words == other.words)
    }
}

impl Eq for WordLadder {}

impl fmt::Display for WordLadder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

impl Puzzle for WordLadder {
    fn is_solved(&self) -> bool {
        self.from == self.to
    }

    /// Every move lands on a vocabulary word of the same length, so a goal of
    /// another length or outside the vocabulary is unreachable.
    fn fail_fast(&self) -> bool {
        !self.is_solved()
            && (self.from.chars().count() != self.to.chars().count()
                || !self.words.contains(&self.to))
    }

    fn extensions(&self) -> Vec<Self> {
        self.words
            .iter()
            .filter(|word| one_letter_apart(&self.from, word))
            .map(|word| {
                Self::with_vocabulary(word.clone(), self.to.clone(), Arc::clone(&self.words))
            })
            .collect()
    }
}
