//! Difficulty classification by shortest-solution length.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bfs::BfsSolver;
use crate::error::SearchError;
use crate::puzzle::Puzzle;
use crate::solver::{Solver, SolverConfig};

/// How many moves the shortest solution takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Already solved, or one move away
    Trivial,
    /// Exactly two moves
    Easy,
    /// Three or four moves
    Medium,
    /// Five moves or more
    Hard,
    /// No solution
    Impossible,
}

impl Difficulty {
    /// Map a shortest-solution length (in moves) to a difficulty
    pub fn from_steps(steps: Option<usize>) -> Self {
        match steps {
            None => Difficulty::Impossible,
            Some(0 | 1) => Difficulty::Trivial,
            Some(2) => Difficulty::Easy,
            Some(3 | 4) => Difficulty::Medium,
            Some(_) => Difficulty::Hard,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Trivial => "trivial",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Impossible => "impossible",
        };
        f.write_str(name)
    }
}

/// Classify `puzzle` using a breadth-first search for its shortest solution.
pub fn classify<P: Puzzle>(puzzle: P, config: &SolverConfig) -> Result<Difficulty, SearchError> {
    if puzzle.is_solved() {
        return Ok(Difficulty::Trivial);
    }
    let path = BfsSolver::with_config(config.clone()).solve(puzzle, None)?;
    Ok(Difficulty::from_steps(path.len().checked_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Graph;

    #[test]
    fn test_from_steps_thresholds() {
        assert_eq!(Difficulty::from_steps(None), Difficulty::Impossible);
        assert_eq!(Difficulty::from_steps(Some(0)), Difficulty::Trivial);
        assert_eq!(Difficulty::from_steps(Some(1)), Difficulty::Trivial);
        assert_eq!(Difficulty::from_steps(Some(2)), Difficulty::Easy);
        assert_eq!(Difficulty::from_steps(Some(3)), Difficulty::Medium);
        assert_eq!(Difficulty::from_steps(Some(4)), Difficulty::Medium);
        assert_eq!(Difficulty::from_steps(Some(5)), Difficulty::Hard);
        assert_eq!(Difficulty::from_steps(Some(40)), Difficulty::Hard);
    }

    #[test]
    fn test_classify_uses_shortest_path() {
        // A long detour exists, but the direct route is two moves.
        let graph = Graph::builder()
            .edges(0, &[1, 2])
            .edges(1, &[3])
            .edges(3, &[4])
            .edges(4, &[5])
            .edges(5, &[6])
            .edges(2, &[6])
            .goal(6)
            .build();
        let config = SolverConfig::default();
        assert_eq!(classify(graph.start(0), &config).unwrap(), Difficulty::Easy);
        assert_eq!(classify(graph.start(3), &config).unwrap(), Difficulty::Medium);
        assert_eq!(classify(graph.start(6), &config).unwrap(), Difficulty::Trivial);
        assert_eq!(classify(Graph::chain(5).start(0), &config).unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_classify_impossible() {
        let graph = Graph::builder().edges(0, &[1]).goal(2).build();
        assert_eq!(
            classify(graph.start(0), &SolverConfig::default()).unwrap(),
            Difficulty::Impossible
        );
    }

    #[test]
    fn test_display_and_serde_agree() {
        for difficulty in [Difficulty::Easy, Difficulty::Impossible] {
            let json = serde_json::to_string(&difficulty).unwrap();
            assert_eq!(json, format!("\"{}\"", difficulty));
        }
    }
}
