//! Generalised n x n sudoku over an arbitrary symbol set.
//!
//! `n` must be a perfect square; the grid is split into `sqrt(n)` x `sqrt(n)`
//! sub-squares. Empty cells are written as `.` or a space.

use std::collections::BTreeSet;
use std::fmt;

use smallvec::SmallVec;

use crate::dfs::DfsSolver;
use crate::error::{PuzzleError, SearchError};
use crate::puzzle::{Puzzle, Seen};
use crate::solver::{Solver, SolverConfig};

const EMPTY: char = '.';

/// Candidate symbols for one cell
pub type Candidates = SmallVec<[char; 16]>;

fn is_empty_marker(c: char) -> bool {
    c == EMPTY || c == ' '
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    n: usize,
    sub: usize,
    grid: Vec<Vec<Option<char>>>,
    symbols: BTreeSet<char>,
}

impl Sudoku {
    pub fn new(grid: Vec<Vec<Option<char>>>, symbols: BTreeSet<char>) -> Result<Self, PuzzleError> {
        let n = grid.len();
        let sub = (1..=n).find(|s| s * s >= n).unwrap_or(0);
        if n == 0 || sub * sub != n {
            return Err(PuzzleError::BadSize(n));
        }
        if symbols.len() != n {
            return Err(PuzzleError::SymbolCount {
                expected: n,
                actual: symbols.len(),
            });
        }
        if let Some(&symbol) = symbols.iter().find(|&&c| is_empty_marker(c)) {
            return Err(PuzzleError::ReservedSymbol(symbol));
        }
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != n {
                return Err(PuzzleError::RowLength {
                    row,
                    expected: n,
                    actual: cells.len(),
                });
            }
            for (col, cell) in cells.iter().enumerate() {
                if let Some(symbol) = *cell {
                    if !symbols.contains(&symbol) {
                        return Err(PuzzleError::UnknownSymbol { row, col, symbol });
                    }
                }
            }
        }
        Ok(Self {
            n,
            sub,
            grid,
            symbols,
        })
    }

    /// Build from row strings such as `"AB.."`, one character per cell.
    pub fn parse<S: AsRef<str>>(symbols: &str, rows: &[S]) -> Result<Self, PuzzleError> {
        let grid = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|c| if is_empty_marker(c) { None } else { Some(c) })
                    .collect()
            })
            .collect();
        Self::new(grid, symbols.chars().collect())
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.grid.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_none())
                .map(move |(c, _)| (r, c))
        })
    }

    /// Symbols not yet used in the cell's row, column or sub-square.
    /// A cell outside the grid has none.
    pub fn candidates(&self, row: usize, col: usize) -> Candidates {
        if row >= self.n || col >= self.n {
            return Candidates::new();
        }
        let top = row - row % self.sub;
        let left = col - col % self.sub;
        let sub_square = (top..top + self.sub)
            .flat_map(|r| (left..left + self.sub).map(move |c| (r, c)));
        let used: BTreeSet<char> = (0..self.n)
            .map(|c| (row, c))
            .chain((0..self.n).map(|r| (r, col)))
            .chain(sub_square)
            .filter_map(|(r, c)| self.grid[r][c])
            .collect();
        self.symbols.iter().copied().filter(|s| !used.contains(s)).collect()
    }

    fn group_complete(&self, cells: impl Iterator<Item = (usize, usize)>) -> bool {
        let symbols: BTreeSet<char> = cells.filter_map(|(r, c)| self.grid[r][c]).collect();
        symbols == self.symbols
    }

    /// Whether exactly one way exists to fill the empty cells. Both searches
    /// run depth-first under `config`, so its timeout, depth limit and cancel
    /// flag bound the whole check.
    pub fn has_unique_solution(&self, config: &SolverConfig) -> Result<bool, SearchError> {
        if self.is_solved() {
            return Ok(true);
        }
        let solver = DfsSolver::with_config(config.clone());
        let first = solver.solve(self.clone(), None)?;
        let Some(solution) = first.last() else {
            return Ok(false);
        };
        let mut seen = Seen::with_fingerprints([solution.fingerprint()]);
        Ok(solver.solve(self.clone(), Some(&mut seen))?.is_empty())
    }
}

impl fmt::Display for Sudoku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.unwrap_or(EMPTY))?;
            }
        }
        Ok(())
    }
}

impl Puzzle for Sudoku {
    fn is_solved(&self) -> bool {
        let n = self.n;
        let sub = self.sub;
        self.empty_cells().next().is_none()
            && (0..n).all(|r| self.group_complete((0..n).map(|c| (r, c))))
            && (0..n).all(|c| self.group_complete((0..n).map(|r| (r, c))))
            && (0..n).all(|b| {
                let (top, left) = ((b / sub) * sub, (b % sub) * sub);
                self.group_complete(
                    (top..top + sub).flat_map(|r| (left..left + sub).map(move |c| (r, c))),
                )
            })
    }

    /// Some empty cell has no symbol left to take.
    fn fail_fast(&self) -> bool {
        self.empty_cells().any(|(r, c)| self.candidates(r, c).is_empty())
    }

    /// Fill the first empty cell (row-major) with each remaining candidate.
    fn extensions(&self) -> Vec<Self> {
        let Some((row, col)) = self.empty_cells().next() else {
            return Vec::new();
        };
        self.candidates(row, col)
            .into_iter()
            .map(|symbol| {
                let mut next = self.clone();
                next.grid[row][col] = Some(symbol);
                next
            })
            .collect()
    }
}
