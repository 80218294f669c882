//! JSON puzzle documents accepted by the command-line tool.
//!
//! ```json
//! {"kind": "word_ladder", "from": "cold", "to": "warm", "wordsFile": "words.txt"}
//! {"kind": "sudoku", "symbols": "ABCD", "rows": ["AB..", "CD..", "....", "...."]}
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::sudoku::Sudoku;
use crate::word_ladder::{load_words, WordLadder};

/// A puzzle description, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PuzzleDocument {
    #[serde(rename_all = "camelCase")]
    WordLadder {
        from: String,
        to: String,
        /// Inline vocabulary
        #[serde(default, skip_serializing_if = "Option::is_none")]
        words: Option<Vec<String>>,
        /// Word list file, relative to the document's directory
        #[serde(default, skip_serializing_if = "Option::is_none")]
        words_file: Option<PathBuf>,
    },
    Sudoku {
        symbols: String,
        rows: Vec<String>,
    },
}

/// A puzzle ready to be searched
#[derive(Debug, Clone)]
pub enum LoadedPuzzle {
    WordLadder(WordLadder),
    Sudoku(Sudoku),
}

impl PuzzleDocument {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: &Path) -> Result<Self, InputError> {
        let json = fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build the puzzle. Relative word-list paths resolve against `base_dir`
    /// when given.
    pub fn load(self, base_dir: Option<&Path>) -> Result<LoadedPuzzle, InputError> {
        match self {
            PuzzleDocument::WordLadder {
                from,
                to,
                words,
                words_file,
            } => {
                let mut vocabulary = match words_file {
                    Some(file) => {
                        let file = match base_dir {
                            Some(dir) if file.is_relative() => dir.join(file),
                            _ => file,
                        };
                        load_words(file)?
                    }
                    None if words.is_some() => Default::default(),
                    None => return Err(InputError::MissingWords),
                };
                vocabulary.extend(words.into_iter().flatten());
                Ok(LoadedPuzzle::WordLadder(WordLadder::with_vocabulary(
                    from,
                    to,
                    Arc::new(vocabulary),
                )))
            }
            PuzzleDocument::Sudoku { symbols, rows } => {
                Ok(LoadedPuzzle::Sudoku(Sudoku::parse(&symbols, &rows)?))
            }
        }
    }
}
