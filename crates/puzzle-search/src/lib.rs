//! Generic search engine for full-information puzzles.
//!
//! A puzzle implements [`Puzzle`] (fingerprint, solved and dead-end checks,
//! successor generation) and can then be solved depth-first with
//! [`DfsSolver`] or breadth-first with [`BfsSolver`]. Word ladders and
//! sudoku grids are bundled as ready-made domains.

pub mod bfs;
pub mod dfs;
pub mod difficulty;
pub mod error;
pub mod input;
pub mod puzzle;
pub mod solver;
pub mod sudoku;
pub mod word_ladder;

#[cfg(test)]
mod testing;

// Re-export main types
pub use bfs::BfsSolver;
pub use dfs::DfsSolver;
pub use difficulty::{classify, Difficulty};
pub use error::{InputError, PuzzleError, SearchError};
pub use input::{LoadedPuzzle, PuzzleDocument};
pub use puzzle::{Puzzle, Seen};
pub use solver::{CancelFlag, SearchOutcome, SearchStats, Solver, SolverConfig, SolverKind};
pub use sudoku::Sudoku;
pub use word_ladder::{load_words, WordLadder};
