//! Error types for the search engine and the bundled puzzle domains.
//!
//! "No solution" is never an error: solvers report it as an empty path.
//! The variants here are the fatal outcomes a caller has to handle.

use std::time::Duration;

use thiserror::Error;

/// A search that ran out of a resource or was stopped from outside.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search timed out after {0:?}")]
    Timeout(Duration),
    #[error("search cancelled")]
    Cancelled,
    #[error("search depth exceeded the limit of {0}")]
    DepthLimit(usize),
    #[error("search discovered more than {0} states")]
    StateLimit(usize),
}

/// A puzzle that could not be constructed from the given parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("sudoku size {0} is not a positive perfect square")]
    BadSize(usize),
    #[error("expected {expected} symbols, got {actual}")]
    SymbolCount { expected: usize, actual: usize },
    #[error("expected {expected} cells in row {row}, got {actual}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{0:?} marks an empty cell and cannot be a symbol")]
    ReservedSymbol(char),
    #[error("cell ({row}, {col}) holds unknown symbol {symbol:?}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

/// Failure to turn a puzzle document into a puzzle.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word ladder needs either `words` or `wordsFile`")]
    MissingWords,
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
