//! Depth-first backtracking search.
//!
//! The traversal is the classic recursive one (fail fast, mark visited,
//! succeed if solved, otherwise try each unvisited extension in order and
//! stop at the first success) but the call stack is replaced by a heap
//! `Vec` of frames, so deep state graphs cannot overflow the native stack.

use log::{debug, trace};

use crate::error::SearchError;
use crate::puzzle::{Puzzle, Seen};
use crate::solver::{Budget, SearchOutcome, SearchStats, Solver, SolverConfig};

/// One level of the backtracking stack: a state on the current path and the
/// extensions not yet tried from it.
struct Frame<P> {
    state: P,
    pending: std::vec::IntoIter<P>,
}

/// Depth-first solver. Finds *a* solution, not necessarily the shortest.
#[derive(Debug, Clone, Default)]
pub struct DfsSolver {
    config: SolverConfig,
}

impl DfsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl Solver for DfsSolver {
    fn search<P: Puzzle>(
        &self,
        puzzle: P,
        seen: Option<&mut Seen>,
    ) -> Result<SearchOutcome<P>, SearchError> {
        let budget = Budget::start(&self.config);
        let mut local = Seen::new();
        let seen = seen.unwrap_or(&mut local);

        let mut stats = SearchStats::default();
        let mut stack: Vec<Frame<P>> = Vec::new();
        let mut next = Some(puzzle);

        loop {
            if let Some(state) = next.take() {
                let depth = stack.len();
                budget.check_depth(depth)?;

                // A dead end is skipped without being marked, exactly as if
                // its recursive call had returned an empty path.
                if !state.fail_fast() {
                    seen.mark(state.fingerprint());
                    stats.max_depth = stats.max_depth.max(depth);

                    if state.is_solved() {
                        let mut path: Vec<P> = stack.into_iter().map(|frame| frame.state).collect();
                        path.push(state);
                        stats.time_elapsed_ms = budget.elapsed_ms();
                        debug!(
                            "dfs found a {}-step solution after expanding {} states",
                            path.len() - 1,
                            stats.states_expanded
                        );
                        return Ok(SearchOutcome { path, stats });
                    }

                    budget.check()?;
                    let extensions = state.extensions();
                    trace!(
                        "dfs expanding {} at depth {}: {} extensions",
                        state,
                        depth,
                        extensions.len()
                    );

                    stats.states_expanded += 1;
                    stats.states_generated += extensions.len();
                    stack.push(Frame {
                        state,
                        pending: extensions.into_iter(),
                    });
                    stats.max_frontier = stats.max_frontier.max(stack.len());
                }
            }

            // Siblings are checked against `seen` only when reached, so a
            // state visited deeper in an earlier branch is not tried again.
            let Some(top) = stack.last_mut() else {
                break;
            };
            match top.pending.find(|ext| !seen.contains(&ext.fingerprint())) {
                Some(ext) => next = Some(ext),
                None => {
                    stack.pop();
                }
            }
        }

        stats.time_elapsed_ms = budget.elapsed_ms();
        debug!(
            "dfs exhausted the search after expanding {} states",
            stats.states_expanded
        );
        Ok(SearchOutcome {
            path: Vec::new(),
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fingerprints, Graph};

    #[test_log::test]
    fn test_already_solved_returns_single_state() {
        let graph = Graph::builder().edges(0, &[1]).goal(0).build();
        let path = DfsSolver::new().solve(graph.start(0), None).unwrap();
        assert_eq!(fingerprints(&path), vec!["node 0"]);
        assert_eq!(graph.expansions(), 0);
    }

    #[test_log::test]
    fn test_fail_fast_returns_empty_without_extensions() {
        let graph = Graph::builder().edges(0, &[1]).goal(1).dead(0).build();
        let path = DfsSolver::new().solve(graph.start(0), None).unwrap();
        assert!(path.is_empty());
        assert_eq!(graph.expansions(), 0);
    }

    #[test_log::test]
    fn test_follows_first_branch_in_enumeration_order() {
        // 0 -> 1 -> 2 -> 5 is found before the direct edge 0 -> 5.
        let graph = Graph::builder()
            .edges(0, &[1, 5])
            .edges(1, &[2])
            .edges(2, &[5])
            .goal(5)
            .build();
        let path = DfsSolver::new().solve(graph.start(0), None).unwrap();
        assert_eq!(fingerprints(&path), vec!["node 0", "node 1", "node 2", "node 5"]);
    }

    #[test_log::test]
    fn test_backtracks_out_of_dead_branch() {
        let graph = Graph::builder()
            .edges(0, &[1, 2])
            .edges(1, &[3])
            .edges(2, &[4])
            .goal(4)
            .build();
        let path = DfsSolver::new().solve(graph.start(0), None).unwrap();
        assert_eq!(fingerprints(&path), vec!["node 0", "node 2", "node 4"]);
    }

    #[test_log::test]
    fn test_max_depth_counts_the_solved_state() {
        let graph = Graph::chain(3);
        let outcome = DfsSolver::new().search(graph.start(0), None).unwrap();
        assert_eq!(outcome.steps(), Some(3));
        assert_eq!(outcome.stats.max_depth, 3);

        let solved = Graph::builder().goal(0).build();
        let outcome = DfsSolver::new().search(solved.start(0), None).unwrap();
        assert_eq!(outcome.stats.max_depth, 0);
    }

    #[test_log::test]
    fn test_cycles_terminate() {
        let graph = Graph::builder()
            .edges(0, &[1])
            .edges(1, &[2, 0])
            .edges(2, &[0, 1])
            .goal(9)
            .build();
        let mut seen = Seen::new();
        let path = DfsSolver::new().solve(graph.start(0), Some(&mut seen)).unwrap();
        assert!(path.is_empty());
        assert_eq!(seen.len(), 3);
        assert_eq!(graph.expansions(), 3);
    }

    #[test_log::test]
    fn test_shared_substate_is_expanded_once() {
        // Both 1 and 2 lead to 3; 3 is a dead end and must not be re-explored.
        let graph = Graph::builder()
            .edges(0, &[1, 2])
            .edges(1, &[3])
            .edges(2, &[3])
            .goal(9)
            .build();
        let outcome = DfsSolver::new().search(graph.start(0), None).unwrap();
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.stats.states_expanded, 4);
    }

    #[test_log::test]
    fn test_preseeded_seen_blocks_path() {
        let graph = Graph::builder().edges(0, &[1]).edges(1, &[2]).goal(2).build();
        let mut seen = Seen::with_fingerprints(["node 1"]);
        let path = DfsSolver::new().solve(graph.start(0), Some(&mut seen)).unwrap();
        assert!(path.is_empty());
        assert!(seen.contains("node 0"));
    }

    #[test_log::test]
    fn test_depth_limit_is_an_error() {
        let graph = Graph::chain(3);
        let solver = DfsSolver::with_config(SolverConfig::default().with_max_depth(2));
        assert_eq!(
            solver.solve(graph.start(0), None).unwrap_err(),
            SearchError::DepthLimit(2)
        );
    }

    #[test_log::test]
    fn test_long_chain_does_not_overflow() {
        let graph = Graph::chain(200_000);
        let outcome = DfsSolver::new().search(graph.start(0), None).unwrap();
        assert_eq!(outcome.steps(), Some(200_000));
        assert_eq!(outcome.stats.max_depth, 200_000);
    }
}
