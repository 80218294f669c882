//! Breadth-first search with parent-pointer path reconstruction.
//!
//! Memory grows with the number of distinct states discovered: every
//! discovered state stays in the arena until the solve returns, because any
//! of them may end up on the solution path. `SolverConfig::max_states` bounds
//! this.

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};

use crate::error::SearchError;
use crate::puzzle::{Puzzle, Seen};
use crate::solver::{Budget, SearchOutcome, SearchStats, Solver, SolverConfig};

struct Node<P> {
    state: P,
    fingerprint: String,
    depth: usize,
}

/// Search bookkeeping for one solve: discovered states, the parent map
/// (fingerprint -> arena index of the state that discovered it) and the
/// FIFO frontier of arena indices.
struct Search<'a, P> {
    budget: Budget<'a>,
    seen: &'a mut Seen,
    nodes: Vec<Node<P>>,
    parents: HashMap<String, usize>,
    frontier: VecDeque<usize>,
    stats: SearchStats,
}

impl<'a, P: Puzzle> Search<'a, P> {
    /// Enqueue every extension of `nodes[index]` that is neither visited nor
    /// already waiting in the frontier.
    fn expand(&mut self, index: usize) -> Result<(), SearchError> {
        self.budget.check()?;
        let extensions = self.nodes[index].state.extensions();
        let depth = self.nodes[index].depth + 1;
        trace!(
            "bfs expanding {} at depth {}: {} extensions",
            self.nodes[index].state,
            depth - 1,
            extensions.len()
        );
        self.stats.states_expanded += 1;
        self.stats.states_generated += extensions.len();

        for state in extensions {
            let fingerprint = state.fingerprint();
            if self.seen.contains(&fingerprint) || self.parents.contains_key(&fingerprint) {
                continue;
            }
            let child = self.nodes.len();
            self.parents.insert(fingerprint.clone(), index);
            self.nodes.push(Node {
                state,
                fingerprint,
                depth,
            });
            self.frontier.push_back(child);
            self.stats.max_depth = self.stats.max_depth.max(depth);
        }

        self.budget.check_states(self.nodes.len())?;
        self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());
        Ok(())
    }

    /// Walk the parent map from `index` back to the initial state.
    fn into_path(mut self, index: usize) -> SearchOutcome<P> {
        let mut chain = vec![index];
        let mut cur = index;
        while let Some(&parent) = self.parents.get(&self.nodes[cur].fingerprint) {
            chain.push(parent);
            cur = parent;
        }
        chain.reverse();

        let mut slots: Vec<Option<P>> = self.nodes.into_iter().map(|node| Some(node.state)).collect();
        let path = chain.into_iter().filter_map(|i| slots[i].take()).collect();

        self.stats.time_elapsed_ms = self.budget.elapsed_ms();
        SearchOutcome {
            path,
            stats: self.stats,
        }
    }
}

/// Breadth-first solver. Returns a solution with the fewest possible moves
/// among paths that avoid the states in `seen`.
#[derive(Debug, Clone, Default)]
pub struct BfsSolver {
    config: SolverConfig,
}

impl BfsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl Solver for BfsSolver {
    fn search<P: Puzzle>(
        &self,
        puzzle: P,
        seen: Option<&mut Seen>,
    ) -> Result<SearchOutcome<P>, SearchError> {
        let budget = Budget::start(&self.config);
        let mut stats = SearchStats::default();

        if puzzle.fail_fast() {
            stats.time_elapsed_ms = budget.elapsed_ms();
            return Ok(SearchOutcome {
                path: Vec::new(),
                stats,
            });
        }

        let mut local = Seen::new();
        let seen = seen.unwrap_or(&mut local);
        let fingerprint = puzzle.fingerprint();
        seen.mark(fingerprint.clone());

        if puzzle.is_solved() {
            stats.time_elapsed_ms = budget.elapsed_ms();
            return Ok(SearchOutcome {
                path: vec![puzzle],
                stats,
            });
        }

        let mut search = Search {
            budget,
            seen,
            nodes: vec![Node {
                state: puzzle,
                fingerprint,
                depth: 0,
            }],
            parents: HashMap::new(),
            frontier: VecDeque::new(),
            stats,
        };
        search.expand(0)?;

        while let Some(index) = search.frontier.pop_front() {
            let node = &search.nodes[index];
            if node.state.is_solved() {
                let outcome = search.into_path(index);
                debug!(
                    "bfs found a {}-step solution after expanding {} states",
                    outcome.path.len() - 1,
                    outcome.stats.states_expanded
                );
                return Ok(outcome);
            }

            // A visited state reaching this point is left unexpanded; the
            // frontier never holds duplicates, so this only guards states
            // marked by the caller.
            let expandable = !search.seen.contains(&node.fingerprint) && !node.state.fail_fast();
            let fingerprint = node.fingerprint.clone();
            if expandable {
                search.expand(index)?;
            }
            search.seen.mark(fingerprint);
        }

        search.stats.time_elapsed_ms = search.budget.elapsed_ms();
        debug!(
            "bfs exhausted the frontier after expanding {} states ({} discovered)",
            search.stats.states_expanded,
            search.nodes.len()
        );
        Ok(SearchOutcome {
            path: Vec::new(),
            stats: search.stats,
        })
    }
}
